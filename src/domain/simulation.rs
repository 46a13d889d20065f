use std::io::Write;

use crate::domain::network::network::Network;
use crate::domain::scheduler::link_scheduler::{LinkScheduler, SCHEDULER_PRIORITY};
use crate::domain::scheduler::run_summary::RunSummary;
use crate::domain::settings::SimSettings;
use crate::domain::simulator::simulator::{SimEvent, SimulationClock, Simulator};
use crate::domain::statistics::{self, StatParameter, StatisticEvent, StatsCollector};
use crate::error::Result;

/// Statistics run after the scheduler when both fall on the same ASN.
pub const END_OF_CYCLE_PRIORITY: i32 = 10;
pub const END_OF_SIMULATION_PRIORITY: i32 = 20;

/// What a finished simulation reports back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub scheduler_runs: u64,
    pub cycles: u64,
    pub last_summary: Option<RunSummary>,
    pub schedule_collisions: u64,
}

/// Wires network, link scheduler, event engine and statistics together.
pub struct Simulation {
    settings: SimSettings,
    network: Network,
    scheduler: LinkScheduler,
    engine: Simulator,
    stats: StatsCollector<Box<dyn Write>>,
    cycles: u64,
}

impl Simulation {
    /// Statistics go to `settings.stats_file`, or stdout if none is configured.
    pub fn new(settings: SimSettings, network: Network) -> Result<Self> {
        let stats = StatsCollector::open(settings.stats_file.as_deref())?;
        Ok(Self::with_stats(settings, network, stats))
    }

    pub fn with_stats(settings: SimSettings, network: Network, stats: StatsCollector<Box<dyn Write>>) -> Self {
        let scheduler = LinkScheduler::new(&settings);

        Self { settings, network, scheduler, engine: Simulator::new(), stats, cycles: 0 }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn scheduler(&self) -> &LinkScheduler {
        &self.scheduler
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Schedules the initial events: first scheduler run at ASN 0, first statistics at the end
    /// of the first slotframe and the end of the simulation.
    pub fn start(&mut self) {
        let slotframe_length = self.settings.slotframe_length as u64;

        self.engine.schedule_at_asn(0, SCHEDULER_PRIORITY, SimEvent::UpdateSchedules);
        self.engine.schedule_at_asn(slotframe_length, END_OF_CYCLE_PRIORITY, SimEvent::EndOfCycle);
        self.engine.schedule_at_asn(self.settings.end_asn(), END_OF_SIMULATION_PRIORITY, SimEvent::EndOfSimulation);

        log::info!(
            "Simulation started: {} motes, {} channels, slotframe length {}, {} cycles.",
            self.network.len(),
            self.settings.num_channels,
            self.settings.slotframe_length,
            self.settings.num_cycles
        );
    }

    /// Dispatches events until the end of the simulation, then writes the final schedule dump.
    pub fn run(&mut self) -> Result<SimulationReport> {
        if self.engine.pending_events() == 0 {
            self.start();
        }

        while let Some(next) = self.engine.pop_next() {
            match next.event {
                SimEvent::UpdateSchedules => {
                    self.scheduler.update_mote_schedules(&mut self.network, &mut self.engine)?;
                }
                SimEvent::EndOfCycle => self.on_end_of_cycle()?,
                SimEvent::EndOfSimulation => {
                    log::info!("End of simulation reached at asn {}.", next.asn);
                    break;
                }
            }
        }

        self.stats.flush()?;

        if let Some(path) = self.settings.schedule_file.as_deref() {
            statistics::write_schedule(&self.network, statistics::open_output(Some(path))?)?;
            log::info!("Final schedule written to '{}'.", path);
        }

        Ok(SimulationReport {
            scheduler_runs: self.scheduler.run_count(),
            cycles: self.cycles,
            last_summary: self.scheduler.last_summary().cloned(),
            schedule_collisions: statistics::count_schedule_collisions(&self.network),
        })
    }

    fn on_end_of_cycle(&mut self) -> Result<()> {
        let asn = self.engine.current_asn();
        let cycle = asn / self.settings.slotframe_length as u64;
        self.cycles += 1;

        let grid_size = (self.settings.num_channels * self.settings.slotframe_length) as f64;
        let collisions = statistics::count_schedule_collisions(&self.network);

        let mut event = StatisticEvent::new();
        event.set(StatParameter::Cycle, cycle).set(StatParameter::Asn, asn);

        if let Some(summary) = self.scheduler.last_summary() {
            event
                .set(StatParameter::Links, summary.links.len())
                .set(StatParameter::TotalDemand, summary.total_demand())
                .set(StatParameter::CellsPlaced, summary.cells_placed)
                .set(StatParameter::Utilization, summary.cells_placed as f64 / grid_size)
                .set(StatParameter::UnmetDemand, summary.unmet_demand);
        }

        event.set(StatParameter::ActiveMotes, statistics::count_active_motes(&self.network)).set(StatParameter::ScheduleCollisions, collisions);

        if collisions > 0 {
            log::error!("Cycle {}: {} schedule collisions detected.", cycle, collisions);
        }

        self.stats.add_event(&event)?;
        log::debug!("Cycle {} finished at asn {}.", cycle, asn);

        self.engine.schedule_at_asn(asn + self.settings.slotframe_length as u64, END_OF_CYCLE_PRIORITY, SimEvent::EndOfCycle);
        Ok(())
    }
}
