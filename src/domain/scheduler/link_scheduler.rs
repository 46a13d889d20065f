use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::network::topology_trait::MoteTopology;
use crate::domain::scheduler::demand::DemandBuilder;
use crate::domain::scheduler::grid_scheduler::GridScheduler;
use crate::domain::scheduler::link::LinkInfo;
use crate::domain::scheduler::link_store::LinkStore;
use crate::domain::scheduler::publisher::{PublishedSchedule, SchedulePublisher};
use crate::domain::scheduler::run_summary::RunSummary;
use crate::domain::scheduler::slot_frame::SlotFrame;
use crate::domain::settings::SimSettings;
use crate::domain::simulator::simulator::{Asn, SimEvent, SimulationClock};
use crate::error::Result;

/// Engine priority of the periodic scheduler run.
pub const SCHEDULER_PRIORITY: i32 = 5;

/// Centralized TSCH link scheduler.
///
/// Each run rebuilds demand, links and grid from scratch; nothing but the published mote
/// schedules carries over. The grid and links of the last run stay readable for statistics
/// until the next run replaces them.
#[derive(Debug)]
pub struct LinkScheduler<R: Rng = StdRng> {
    grid_scheduler: GridScheduler,
    slotframe_length: usize,
    update_period: Asn,
    rng: R,

    links: LinkStore,
    slot_frame: SlotFrame,
    last_summary: Option<RunSummary>,
    run_count: u64,
}

impl LinkScheduler<StdRng> {
    /// Seeds the channel randomization from `settings.rng_seed`, or from the OS when no seed is set.
    pub fn new(settings: &SimSettings) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::with_rng(settings, rng)
    }
}

impl<R: Rng> LinkScheduler<R> {
    pub fn with_rng(settings: &SimSettings, rng: R) -> Self {
        Self {
            grid_scheduler: GridScheduler::new(settings.num_channels, settings.slotframe_length),
            slotframe_length: settings.slotframe_length,
            update_period: settings.update_period,
            rng,
            links: LinkStore::new(),
            slot_frame: SlotFrame::new(settings.num_channels, settings.slotframe_length),
            last_summary: None,
            run_count: 0,
        }
    }

    /// Full periodic run: computes a new schedule, hands it to the motes and re-arms the next
    /// run `update_period` ticks from now.
    pub fn update_mote_schedules<T, C>(&mut self, topology: &mut T, clock: &mut C) -> Result<RunSummary>
    where
        T: MoteTopology + ?Sized,
        C: SimulationClock + ?Sized,
    {
        let asn = clock.current_asn();
        let schedule = self.compute_schedule(topology)?;
        let motes_updated = SchedulePublisher::publish(&schedule, topology)?;

        if let Some(summary) = self.last_summary.as_mut() {
            summary.motes_updated = motes_updated;
        }

        clock.schedule_at_asn(asn.saturating_add(self.update_period), SCHEDULER_PRIORITY, SimEvent::UpdateSchedules);

        let summary = self.last_summary.clone().unwrap_or_default();

        log::info!(
            "Scheduler run {} at asn {}: {} links, {} cells placed, {} unmet, used length {}/{}.",
            self.run_count,
            asn,
            summary.links.len(),
            summary.cells_placed,
            summary.unmet_demand,
            summary.used_length,
            summary.slotframe_length
        );

        Ok(summary)
    }

    /// Demand build, placement and channel randomization, without touching the motes.
    pub fn compute_schedule<T: MoteTopology + ?Sized>(&mut self, topology: &mut T) -> Result<PublishedSchedule> {
        let demand_report = DemandBuilder::build(topology)?;

        let mut links = demand_report.into_link_store();
        let slot_frame = self.grid_scheduler.schedule(&mut links, &mut self.rng);

        let conflicts = GridScheduler::conflicting_timeslots(&slot_frame, &links);
        if !conflicts.is_empty() {
            log::error!("Slot frame contains conflicting links in timeslots {:?}.", conflicts);
        }

        let schedule = SchedulePublisher::build(&slot_frame, &links, self.slotframe_length);

        let link_infos = links.infos(|key| slot_frame.placed_count(key));
        let summary = RunSummary {
            unmet_demand: link_infos.iter().map(|link| link.unmet_demand as u64).sum(),
            links: link_infos,
            cells_placed: slot_frame.occupied_count(),
            ambiguous_parents: demand_report.ambiguous_parents,
            isolated_motes: demand_report.isolated_motes,
            dropped_demand: demand_report.dropped_demand,
            used_length: schedule.used_length,
            slotframe_length: schedule.slotframe_length,
            motes_updated: 0,
        };

        for link in summary.links_with_unmet_demand() {
            log::warn!("CapacityExhausted: link {} ({} -> {}) has {} unmet cells.", link.id, link.sender, link.receiver, link.unmet_demand);
        }

        self.links = links;
        self.slot_frame = slot_frame;
        self.last_summary = Some(summary);
        self.run_count += 1;

        Ok(schedule)
    }

    /// Grid of the last run, after channel randomization.
    pub fn slot_frame(&self) -> &SlotFrame {
        &self.slot_frame
    }

    pub fn link_store(&self) -> &LinkStore {
        &self.links
    }

    /// Links of the last run ordered by id.
    pub fn links(&self) -> Vec<LinkInfo> {
        self.links.infos(|key| self.slot_frame.placed_count(key))
    }

    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    pub fn run_count(&self) -> u64 {
        self.run_count
    }

    pub fn update_period(&self) -> Asn {
        self.update_period
    }
}
