//! Stratum - a pseudo-3D platformer collision engine
//!
//! The engine lives in the workspace crates (`stratum_math`,
//! `stratum_physics`, `stratum_core`); this crate adds configuration and a
//! headless runner.

pub mod config;
