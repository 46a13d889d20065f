use std::collections::HashSet;

use crate::domain::scheduler::link_store::LinkKey;
use crate::domain::utils::id::{LinkId, MoteId};

/// A directed transmission requirement from a mote to its parent for one scheduling run.
#[derive(Debug, Clone)]
pub struct Link {
    /// Sequential id, only stable within the run that created the link.
    pub id: LinkId,

    pub sender: MoteId,

    /// The sender's parent (lowest-rank neighbor).
    pub receiver: MoteId,

    /// Number of cells the link asked for when it was created.
    pub initial_demand: u32,

    /// Cells still needed this epoch. The link is satisfied once this reaches zero.
    pub remaining_demand: u32,

    /// Demand units already processed this epoch, placed or not.
    pub scheduled_count: u32,

    /// Demand units that were consumed without finding a free, conflict-free cell.
    pub unmet_demand: u32,

    /// Links sharing neither endpoint with this one.
    compatible_links: HashSet<LinkKey>,
}

impl Link {
    pub fn new(id: LinkId, sender: MoteId, receiver: MoteId, demand: u32) -> Self {
        Self {
            id,
            sender,
            receiver,
            initial_demand: demand,
            remaining_demand: demand,
            scheduled_count: 0,
            unmet_demand: 0,
            compatible_links: HashSet::new(),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.remaining_demand == 0
    }

    /// True if both links involve at least one common mote, as sender or receiver.
    pub fn shares_mote(&self, other: &Link) -> bool {
        self.sender == other.sender || self.sender == other.receiver || self.receiver == other.sender || self.receiver == other.receiver
    }

    pub fn add_compatible_link(&mut self, key: LinkKey) {
        self.compatible_links.insert(key);
    }

    pub fn is_compatible(&self, key: LinkKey) -> bool {
        self.compatible_links.contains(&key)
    }

    pub fn compatible_links(&self) -> &HashSet<LinkKey> {
        &self.compatible_links
    }

    pub fn clear_compatible_links(&mut self) {
        self.compatible_links.clear();
    }

    /// Accounts for one unit of demand. An unplaced unit is recorded as unmet demand
    /// instead of silently disappearing.
    pub fn consume_demand_unit(&mut self, placed: bool) {
        if self.remaining_demand == 0 {
            log::error!("Link {} ({} -> {}) consumed a demand unit while already satisfied.", self.id, self.sender, self.receiver);
            return;
        }

        self.remaining_demand -= 1;
        self.scheduled_count += 1;

        if !placed {
            self.unmet_demand += 1;
        }
    }

    /// Records every remaining unit as unmet in one step. Used once no eligible cell is left
    /// for the link, since later units could not find one either.
    ///
    /// # Returns
    /// The number of units moved to unmet demand.
    pub fn mark_remaining_unmet(&mut self) -> u32 {
        let remaining = self.remaining_demand;

        self.scheduled_count += remaining;
        self.unmet_demand += remaining;
        self.remaining_demand = 0;

        remaining
    }
}

/// Read-only view of a link for statistics and visualization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    pub id: LinkId,
    pub sender: MoteId,
    pub receiver: MoteId,
    pub initial_demand: u32,
    pub scheduled_count: u32,
    pub placed: u32,
    pub unmet_demand: u32,
}
