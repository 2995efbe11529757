//! Headless platformer server
//!
//! Loads the engine configuration and a world, attaches a few scripted bots
//! through the in-process channel transport and runs the tick scheduler
//! until every bot has left or the tick limit is reached.

mod args;
mod bots;

use clap::Parser;
use log::{error, info};
use platform_engine::foundation::logging;
use platform_engine::prelude::*;

use args::Args;

/// Server start-up and run errors
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Configuration or world file failed to load
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scheduler failed
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// A bot could not attach
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A bot thread could not start
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ticks each bot stays for when no limit is given
const DEFAULT_BOT_LIFETIME: u64 = 600;

fn main() {
    logging::init();

    if let Err(err) = run(Args::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ServerError> {
    let mut config = EngineConfig::load_or_default(args.config.as_deref())?;
    if args.ticks.is_some() {
        config.tick.max_ticks = args.ticks;
    }
    config.validate()?;

    let world_def = WorldDef::load_or_default(args.world.as_deref())?;
    let world = World::from_def(&world_def);

    let simulation = Simulation::new(world, config.clone());
    let mut scheduler = TickScheduler::new(simulation, config.tick.clone())?;
    let (mut transport, connector) = ChannelTransport::new();

    let lifetime = config.tick.max_ticks.unwrap_or(DEFAULT_BOT_LIFETIME);
    let mut bots = Vec::with_capacity(args.bots);
    for index in 0..args.bots {
        let plan = bots::BotPlan::for_index(index, lifetime);
        bots.push(bots::spawn(&connector, format!("bot-{index}"), plan)?);
    }
    // Only the bots keep the transport open from here on
    drop(connector);

    info!("Platform server running with {} bots", args.bots);
    let summary = scheduler.run(&mut transport)?;

    // Release any bot still waiting on the next message
    drop(transport);
    for bot in bots {
        if bot.join().is_err() {
            error!("A bot thread panicked");
        }
    }

    let state = scheduler.simulation().state_snapshot();
    info!(
        "Finished after {} ticks ({:?}); {} players remain at tick {}",
        summary.ticks,
        summary.reason,
        state.players.len(),
        state.tick
    );
    Ok(())
}
