use crate::domain::scheduler::schedule_entry::ScheduleEntry;
use crate::domain::utils::id::MoteId;
use crate::error::Result;

/// What the link scheduler needs to know about the motes, and how it hands schedules back.
///
/// Ids passed to the accessors come from [`MoteTopology::mote_ids`] or from neighbor lists;
/// implementations return [`crate::error::Error::UnknownMote`] for anything else.
pub trait MoteTopology {
    /// All motes, in ascending id order.
    fn mote_ids(&self) -> Vec<MoteId>;

    fn contains(&self, mote: MoteId) -> bool;

    fn is_root(&self, mote: MoteId) -> bool;

    /// Routing rank, lower is closer to the root.
    fn rank(&self, mote: MoteId) -> Result<u32>;

    /// Neighbors in the mote's own order. The order decides ties in parent selection.
    fn neighbors(&self, mote: MoteId) -> Result<Vec<MoteId>>;

    /// Packets the mote has to forward this epoch: its own generation plus relayed traffic.
    fn pending_count(&self, mote: MoteId) -> Result<u32>;

    fn increase_pending_count(&mut self, mote: MoteId, amount: u32) -> Result<()>;

    /// Drops relayed traffic accumulated by a previous aggregation pass, leaving only each
    /// mote's own generation.
    fn reset_relayed_demand(&mut self);

    /// Replaces the mote's schedule as a whole.
    fn assign_schedule(&mut self, mote: MoteId, entries: Vec<ScheduleEntry>, slotframe_length: usize) -> Result<()>;
}
