//! Fixed-rate tick loop
//!
//! Each tick: the transport applies pending client events, the simulation
//! advances by the measured wall-clock delta, and the resulting snapshot is
//! broadcast. The delta is not clamped, so a stall produces one large
//! catch-up step; stalls are logged. Deadlines never accumulate debt: a late
//! tick re-bases the schedule on the current time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use thiserror::Error;

use crate::config::{ConfigError, TickConfig};
use crate::foundation::logging::{info, warn};
use crate::foundation::time::{tick_period, Timer};
use crate::simulation::{Simulation, StepReport};
use crate::transport::{Transport, TransportError};

/// Cloneable handle that asks a running scheduler to stop after its current tick
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request a stop
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Why [`TickScheduler::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_ticks` was reached
    MaxTicks,
    /// A [`StopHandle`] was triggered
    Requested,
    /// The transport can no longer receive events
    TransportClosed,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed by this run
    pub ticks: u64,
    /// What ended the run
    pub reason: StopReason,
}

/// Scheduler errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Rejected tick configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Owns the simulation and drives it at a fixed rate
pub struct TickScheduler {
    simulation: Simulation,
    config: TickConfig,
    timer: Timer,
    stop: StopHandle,
}

impl TickScheduler {
    /// Create a scheduler; fails on an unusable tick rate
    pub fn new(simulation: Simulation, config: TickConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self {
            simulation,
            config,
            timer: Timer::new(),
            stop: StopHandle::default(),
        })
    }

    /// Handle for stopping [`run`](Self::run) from another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The simulation
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Mutable access to the simulation between ticks
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    /// Give the simulation back
    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }

    /// Run one tick with an explicit `dt`
    pub fn tick_with_dt<T: Transport>(&mut self, transport: &mut T, dt: f64) -> Result<StepReport, SchedulerError> {
        transport.pump(&mut self.simulation)?;
        let report = self.simulation.step(dt);
        transport.broadcast(&self.simulation.state_snapshot())?;
        Ok(report)
    }

    /// Tick at the configured rate until stopped
    pub fn run<T: Transport>(&mut self, transport: &mut T) -> Result<RunSummary, SchedulerError> {
        let period = tick_period(self.config.tick_rate_hz);
        let stall_limit = self.config.period_secs() * self.config.stall_warn_factor;
        info!(
            "Scheduler starting at {} Hz with {} players",
            self.config.tick_rate_hz,
            self.simulation.player_count()
        );

        self.timer.reset();
        let mut deadline = Instant::now() + period;
        let mut ticks = 0;

        let reason = loop {
            if self.stop.is_stopped() {
                break StopReason::Requested;
            }
            if self.config.max_ticks.is_some_and(|max| ticks >= max) {
                break StopReason::MaxTicks;
            }
            if transport.is_closed() {
                break StopReason::TransportClosed;
            }

            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
                deadline += period;
            } else {
                deadline = now + period;
            }

            let dt = self.timer.tick();
            if dt > stall_limit {
                warn!("Tick {} stalled: {:.3}s since the previous tick", self.simulation.tick() + 1, dt);
            }
            self.tick_with_dt(transport, dt)?;
            ticks += 1;
        };

        info!(
            "Scheduler stopped after {ticks} ticks ({reason:?}), {:.1} ticks/s on average",
            self.timer.average_rate()
        );
        Ok(RunSummary { ticks, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::simulation::StateSnapshot;
    use crate::world::World;

    #[derive(Default)]
    struct RecordingTransport {
        pumps: u32,
        broadcasts: Vec<StateSnapshot>,
        close_after: Option<usize>,
        connect_on_first_pump: bool,
    }

    impl Transport for RecordingTransport {
        fn pump(&mut self, sim: &mut Simulation) -> Result<(), TransportError> {
            if self.connect_on_first_pump && self.pumps == 0 {
                sim.connect();
            }
            self.pumps += 1;
            Ok(())
        }

        fn broadcast(&mut self, snapshot: &StateSnapshot) -> Result<(), TransportError> {
            self.broadcasts.push(snapshot.clone());
            Ok(())
        }

        fn is_closed(&self) -> bool {
            self.close_after.is_some_and(|n| self.broadcasts.len() >= n)
        }
    }

    fn scheduler(config: TickConfig) -> TickScheduler {
        crate::foundation::logging::init_for_tests();
        let simulation = Simulation::new(World::default(), EngineConfig::default());
        TickScheduler::new(simulation, config).unwrap()
    }

    fn fast(max_ticks: Option<u64>) -> TickConfig {
        TickConfig {
            tick_rate_hz: 1000.0,
            max_ticks,
            ..TickConfig::default()
        }
    }

    #[test]
    fn test_tick_with_dt_pumps_steps_and_broadcasts() {
        let mut scheduler = scheduler(TickConfig::default());
        let mut transport = RecordingTransport {
            connect_on_first_pump: true,
            ..RecordingTransport::default()
        };

        let report = scheduler.tick_with_dt(&mut transport, 0.5).unwrap();
        assert_eq!(report.dt, 0.5);
        assert_eq!(report.players.len(), 1);
        assert_eq!(transport.pumps, 1);
        assert_eq!(transport.broadcasts.len(), 1);
        assert_eq!(transport.broadcasts[0], scheduler.simulation().state_snapshot());
    }

    #[test]
    fn test_run_stops_at_max_ticks() {
        let mut scheduler = scheduler(fast(Some(5)));
        let mut transport = RecordingTransport::default();

        let summary = scheduler.run(&mut transport).unwrap();
        assert_eq!(summary, RunSummary { ticks: 5, reason: StopReason::MaxTicks });
        let ticks: Vec<_> = transport.broadcasts.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_run_stops_when_transport_closes() {
        let mut scheduler = scheduler(fast(None));
        let mut transport = RecordingTransport {
            close_after: Some(3),
            ..RecordingTransport::default()
        };

        let summary = scheduler.run(&mut transport).unwrap();
        assert_eq!(summary.reason, StopReason::TransportClosed);
        assert_eq!(summary.ticks, 3);
    }

    #[test]
    fn test_stop_handle() {
        let mut scheduler = scheduler(fast(None));
        scheduler.stop_handle().stop();

        let summary = scheduler.run(&mut RecordingTransport::default()).unwrap();
        assert_eq!(summary, RunSummary { ticks: 0, reason: StopReason::Requested });
        assert_eq!(scheduler.simulation().tick(), 0);
    }

    #[test]
    fn test_measured_dt_is_positive() {
        let mut scheduler = scheduler(fast(Some(2)));
        let mut transport = RecordingTransport {
            connect_on_first_pump: true,
            ..RecordingTransport::default()
        };
        scheduler.run(&mut transport).unwrap();

        // Two ticks of gravity moved the player down from the spawn
        let player = &transport.broadcasts[1].players[0];
        assert!(player.y > 100.0);
    }

    #[test]
    fn test_invalid_rate_is_rejected() {
        let simulation = Simulation::new(World::default(), EngineConfig::default());
        let config = TickConfig {
            tick_rate_hz: -1.0,
            ..TickConfig::default()
        };
        assert!(matches!(
            TickScheduler::new(simulation, config),
            Err(SchedulerError::Config(_))
        ));
    }
}
