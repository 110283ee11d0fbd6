//! Flappy simulation running on top of `flappy_ecs` registry.
//!
//! Usage: `flappy_rs [TICKS] [FLAP_INTERVAL] [RATE]`, see `flappy_rs --help`.

use std::error::Error;

use clap::Parser;
use flappy_ecs::World;

use crate::components::{Flap, Pipe, Score, Transform};
use crate::config::Config;
use crate::systems::Frame;

mod cli;
mod components;
mod config;
mod logger;
mod systems;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");

/// Entry point of `flappy-rs` simulation
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let args = cli::Args::parse();
    let _handle = logger::init()?;
    log::info!("logger initialized successfully");

    let version = APP_VERSION_STR.parse()?;
    let config = args.apply(Config::new(APP_NAME.to_string(), version));
    log::info!(
        "starting {} v{} for {} ticks",
        config.name(),
        config.version(),
        config.ticks(),
    );

    let mut world = World::new();
    systems::populate(&mut world);
    log::debug!(
        "{} entities, {} systems",
        world.registry().entity_count(),
        world.system_count(),
    );

    let second = config.ticks_per_second();
    for tick in 1..=config.ticks() {
        let flap = config.flap_interval() != 0 && tick % config.flap_interval() == 0;
        let frame = Frame {
            delta: config.delta(),
            flap,
        };
        world.update(&frame);

        if tick % second == 0 {
            let height = world
                .get_components::<(Flap, Transform)>()
                .next()
                .map_or(0.0, |(_, (_, transform))| transform.y);
            let registry = world.registry();
            log::info!(
                "second {}: height {:.1}, {} pipes, {} entities, {} cached queries",
                tick / second,
                height,
                world.get_component::<Pipe>().count(),
                registry.entity_count(),
                registry.cached_queries(),
            );
        }
    }

    let score = world
        .get_component::<Score>()
        .next()
        .map_or(0, |(_, score)| score.value);
    log::info!("simulation finished with score {}", score);
    Ok(())
}
