use crate::domain::scheduler::schedule_entry::{Direction, ScheduleEntry};
use crate::domain::utils::id::MoteId;

/// A node of the simulated mesh.
#[derive(Debug, Clone)]
pub struct Mote {
    pub id: MoteId,

    /// Routing rank supplied by the scenario; the root has the lowest rank.
    pub rank: u32,

    pub neighbors: Vec<MoteId>,

    pub is_root: bool,

    /// Packets this mote generates itself per scheduling epoch.
    pub packets_per_epoch: u32,

    /// Packets received from children during the current aggregation pass.
    relayed_packets: u32,

    schedule: Vec<ScheduleEntry>,

    slotframe_length: usize,
}

impl Mote {
    pub fn new(id: MoteId, rank: u32, neighbors: Vec<MoteId>, packets_per_epoch: u32, is_root: bool) -> Self {
        Self { id, rank, neighbors, is_root, packets_per_epoch, relayed_packets: 0, schedule: Vec::new(), slotframe_length: 0 }
    }

    pub fn pending_count(&self) -> u32 {
        self.packets_per_epoch.saturating_add(self.relayed_packets)
    }

    pub fn increase_pending_count(&mut self, amount: u32) {
        self.relayed_packets = self.relayed_packets.saturating_add(amount);
    }

    pub fn reset_relayed_packets(&mut self) {
        self.relayed_packets = 0;
    }

    pub fn assign_schedule(&mut self, entries: Vec<ScheduleEntry>, slotframe_length: usize) {
        self.schedule = entries;
        self.slotframe_length = slotframe_length;
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.schedule
    }

    /// Length of the slotframe the current schedule was published for; 0 before the first schedule.
    pub fn slotframe_length(&self) -> usize {
        self.slotframe_length
    }

    pub fn num_tx_cells(&self) -> usize {
        self.schedule.iter().filter(|entry| entry.direction == Direction::Tx).count()
    }

    pub fn num_rx_cells(&self) -> usize {
        self.schedule.iter().filter(|entry| entry.direction == Direction::Rx).count()
    }
}
