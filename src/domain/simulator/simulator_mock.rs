use crate::domain::simulator::simulator::{Asn, SimEvent, SimulationClock};

/// Clock with a fixed ASN that records every scheduling request instead of dispatching it.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    pub asn: Asn,
    pub scheduled: Vec<(Asn, i32, SimEvent)>,
}

impl MockClock {
    pub fn new(asn: Asn) -> MockClock {
        MockClock { asn, scheduled: Vec::new() }
    }

    pub fn set_current_asn(&mut self, asn: Asn) {
        self.asn = asn;
    }
}

impl SimulationClock for MockClock {
    fn current_asn(&self) -> Asn {
        self.asn
    }

    fn schedule_at_asn(&mut self, asn: Asn, priority: i32, event: SimEvent) {
        self.scheduled.push((asn, priority, event));
    }
}
