use crate::domain::scheduler::link::LinkInfo;
use crate::domain::utils::id::MoteId;

/// Outcome of one scheduling run. Per-link and per-mote problems end up here instead of
/// aborting the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub links: Vec<LinkInfo>,

    pub cells_placed: usize,

    /// Demand units that found no cell, summed over all links.
    pub unmet_demand: u64,

    pub ambiguous_parents: Vec<MoteId>,

    pub isolated_motes: Vec<MoteId>,

    /// Packets of isolated motes that were not turned into links.
    pub dropped_demand: u64,

    pub used_length: usize,

    pub slotframe_length: usize,

    pub motes_updated: usize,
}

impl RunSummary {
    pub fn total_demand(&self) -> u64 {
        self.links.iter().map(|link| link.initial_demand as u64).sum()
    }

    /// True if every unit of link demand was placed.
    pub fn is_feasible(&self) -> bool {
        self.unmet_demand == 0
    }

    pub fn links_with_unmet_demand(&self) -> impl Iterator<Item = &LinkInfo> {
        self.links.iter().filter(|link| link.unmet_demand > 0)
    }
}
