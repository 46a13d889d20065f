use crate::domain::simulator::event_queue::{EventQueue, ScheduledEvent};

/// Absolute slot number, the global simulation tick.
pub type Asn = u64;

/// Callbacks the simulation can schedule on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimEvent {
    /// Re-run the centralized link scheduler.
    UpdateSchedules,

    /// Collect statistics at the end of a slotframe cycle.
    EndOfCycle,

    EndOfSimulation,
}

/// The engine as seen by components that need the current time or want to be called back later.
pub trait SimulationClock {
    fn current_asn(&self) -> Asn;

    /// Schedules `event` at `asn`. Among events of the same ASN, lower priorities run first.
    fn schedule_at_asn(&mut self, asn: Asn, priority: i32, event: SimEvent);
}

/// Discrete-event engine: dispatching an event advances the clock to the event's ASN.
#[derive(Debug, Default)]
pub struct Simulator {
    asn: Asn,
    queue: EventQueue,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the next event and moves the clock to its ASN.
    pub fn pop_next(&mut self) -> Option<ScheduledEvent> {
        let next = self.queue.pop()?;

        if next.asn < self.asn {
            log::warn!("Event {:?} was scheduled in the past (asn {} < current asn {}).", next.event, next.asn, self.asn);
        } else {
            self.asn = next.asn;
        }

        Some(next)
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}

impl SimulationClock for Simulator {
    fn current_asn(&self) -> Asn {
        self.asn
    }

    fn schedule_at_asn(&mut self, asn: Asn, priority: i32, event: SimEvent) {
        log::trace!("Scheduling {:?} at asn {} (priority {}).", event, asn, priority);
        self.queue.push(asn, priority, event);
    }
}
