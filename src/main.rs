//! Stratum - headless room runner
//!
//! Loads the configured room, drops the player in and walks it around a
//! square for a fixed number of ticks, logging positions and messages.

use stratum::config::AppConfig;
use stratum_core::{to_pixels, ActorInput, IVec3, Room, Stage};

/// Ticks spent walking each side of the square
const LEG_TICKS: u64 = 60;

/// Input for tick `tick` of the scripted walk
fn scripted_input(tick: u64, speed: f32) -> ActorInput {
    let (vx, vy) = match (tick / LEG_TICKS) % 4 {
        0 => (speed, 0.0),
        1 => (0.0, speed),
        2 => (-speed, 0.0),
        _ => (0.0, -speed),
    };
    let input = ActorInput::walking(vx, vy);
    if tick % 90 == 45 {
        input.with_jump()
    } else {
        input
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tile_size = config.room.tile_size;
    let room = Room::load_validated(&config.room.path, tile_size)?;
    let mut stage = Stage::from_room(&room, tile_size, config.physics.to_movement_config());

    let spawn = room.pixel_spawn(tile_size).unwrap_or_else(|| {
        let [x, y, z] = config.simulation.player_spawn;
        IVec3::new(to_pixels(x, tile_size), to_pixels(y, tile_size), to_pixels(z, tile_size))
    });
    let player = stage.spawn_player(spawn);
    log::info!("Player spawned at {:?}", spawn);

    for tick in 0..config.simulation.ticks {
        stage.control(player, scripted_input(tick, config.simulation.player_speed));
        stage.tick();
        if tick % 20 == 10 && stage.interact(player) > 0 {
            log::debug!("Interaction at tick {}", tick);
        }

        let interval = config.debug.report_interval;
        if interval > 0 && tick % interval == 0 {
            if let (Some(collider), Some(mover), Some(actor)) =
                (stage.collider(player), stage.mover(player), stage.actor(player))
            {
                log::info!(
                    "tick {}: player at {:?}, velocity {:?}, grounded {}, shadow {:?}",
                    tick,
                    collider.pos(),
                    mover.velocity,
                    mover.grounded,
                    actor.shadow_z
                );
            }
        }
    }

    let messages = stage.take_messages();
    log::info!(
        "Finished {} ticks in '{}' ({} message lines shown)",
        stage.tick_count(),
        stage.name(),
        messages.len()
    );
    Ok(())
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()))
        .init();
    log::info!("Starting Stratum");

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
