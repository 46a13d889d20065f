use std::collections::BTreeMap;

use crate::domain::network::topology_trait::MoteTopology;
use crate::domain::scheduler::link_store::LinkStore;
use crate::domain::scheduler::schedule_entry::{Direction, ScheduleEntry};
use crate::domain::scheduler::slot_frame::SlotFrame;
use crate::domain::utils::id::MoteId;
use crate::error::{Error, Result};

/// Per-mote schedules derived from a filled slot frame, ready to be handed to the motes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedSchedule {
    pub entries: BTreeMap<MoteId, Vec<ScheduleEntry>>,

    /// Last occupied timeslot plus one.
    pub used_length: usize,

    /// Frame length announced to the motes. Always the nominal length, so timeslots past
    /// `used_length` stay in the frame as idle slots.
    pub slotframe_length: usize,
}

impl PublishedSchedule {
    pub fn entries_for(&self, mote: MoteId) -> &[ScheduleEntry] {
        self.entries.get(&mote).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

pub struct SchedulePublisher;

impl SchedulePublisher {
    /// Walks the occupied cells and creates a TX entry for the sender and an RX entry for the
    /// receiver of every placed link.
    pub fn build(frame: &SlotFrame, store: &LinkStore, slotframe_length: usize) -> PublishedSchedule {
        let mut entries: BTreeMap<MoteId, Vec<ScheduleEntry>> = BTreeMap::new();

        for (channel, timeslot, key) in frame.occupied_cells() {
            let Some(link) = store.get(key) else {
                log::error!("Slot frame cell (channel {}, timeslot {}) refers to a link that is not in the store.", channel, timeslot);
                continue;
            };

            entries.entry(link.sender).or_default().push(ScheduleEntry::new(timeslot, Direction::Tx, link.receiver, channel));
            entries.entry(link.receiver).or_default().push(ScheduleEntry::new(timeslot, Direction::Rx, link.sender, channel));
        }

        let used_length = frame.used_length();

        if used_length > slotframe_length {
            log::warn!("Scheduled cells reach timeslot {} but the slotframe only has {} timeslots.", used_length, slotframe_length);
        }

        PublishedSchedule { entries, used_length, slotframe_length }
    }

    /// Hands every mote with at least one entry its new schedule. Motes without entries are
    /// left untouched.
    ///
    /// All motes are checked before the first assignment, so an unknown mote leaves every
    /// schedule as it was.
    ///
    /// # Returns
    /// The number of motes that received a schedule.
    pub fn publish<T: MoteTopology + ?Sized>(schedule: &PublishedSchedule, topology: &mut T) -> Result<usize> {
        if let Some(unknown) = schedule.entries.keys().find(|mote| !topology.contains(**mote)) {
            log::error!("Schedule refers to mote {} which is not part of the topology, nothing is published.", unknown);
            return Err(Error::UnknownMote(*unknown));
        }

        for (mote, entries) in &schedule.entries {
            topology.assign_schedule(*mote, entries.clone(), schedule.slotframe_length)?;
        }

        log::debug!(
            "Published {} entries to {} motes (used length {}, slotframe length {}).",
            schedule.num_entries(),
            schedule.entries.len(),
            schedule.used_length,
            schedule.slotframe_length
        );

        Ok(schedule.entries.len())
    }
}
