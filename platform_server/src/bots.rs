//! Scripted clients that exercise the server over the channel transport

use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};
use platform_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ServerError;

/// How long a bot waits for a server message before giving up
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Behaviour knobs for one bot
#[derive(Debug, Clone, Copy)]
pub struct BotPlan {
    /// RNG seed for its decisions
    pub seed: u64,
    /// State messages to play for before leaving
    pub lifetime: u64,
    /// Ticks between direction changes
    pub turn_every: u64,
    /// Chance of pressing jump on any tick
    pub jump_chance: f64,
}

impl BotPlan {
    /// Plan for the `index`-th bot
    pub fn for_index(index: usize, lifetime: u64) -> Self {
        Self {
            seed: 0xb07 + index as u64,
            lifetime,
            turn_every: 45 + 15 * index as u64,
            jump_chance: 0.03,
        }
    }
}

/// Attach a bot and run it on its own thread
pub fn spawn(connector: &Connector, name: String, plan: BotPlan) -> Result<JoinHandle<()>, ServerError> {
    let client = connector.connect()?;
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(move || run(&name, client, plan))?;
    Ok(handle)
}

fn run(name: &str, client: ClientHandle, plan: BotPlan) {
    let mut rng = StdRng::seed_from_u64(plan.seed);
    let mut me = None;
    let mut heading = InputIntent {
        right: true,
        ..InputIntent::default()
    };
    let mut seen = 0u64;
    let mut respawns = 0u32;
    let mut last_y = None;

    while seen < plan.lifetime {
        let message = match client.recv_timeout(RECV_TIMEOUT) {
            Ok(Some(message)) => message,
            Ok(None) => {
                warn!("{name}: no message from the server in {RECV_TIMEOUT:?}");
                break;
            }
            Err(_) => break,
        };

        match message {
            ServerMessage::Welcome { player, world } => {
                info!(
                    "{name}: joined as {player} in a {}x{} world with {} obstacles",
                    world.width,
                    world.height,
                    world.obstacles.len()
                );
                me = Some(player);
            }
            ServerMessage::PlayerJoined { player } => debug!("{name}: {} joined", player.name),
            ServerMessage::PlayerLeft { player } => debug!("{name}: player {player} left"),
            ServerMessage::State(state) => {
                seen += 1;
                let Some(mine) = me.and_then(|id| state.players.iter().find(|p| p.id == id)) else {
                    continue;
                };

                // A sudden jump back up the world means lava sent us to spawn
                if last_y.is_some_and(|y: f64| mine.y + 200.0 < y && mine.vy == 0.0) {
                    respawns += 1;
                }
                last_y = Some(mine.y);

                if state.tick % plan.turn_every == 0 {
                    heading = InputIntent {
                        left: heading.right,
                        right: heading.left,
                        jump: false,
                    };
                }
                let intent = InputIntent {
                    jump: mine.grounded && rng.gen_bool(plan.jump_chance),
                    ..heading
                };
                if client.send_input(intent).is_err() {
                    break;
                }
            }
        }
    }

    info!("{name}: leaving after {seen} ticks ({respawns} respawns)");
    // Dropping the handle detaches it
}
