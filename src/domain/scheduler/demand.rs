use crate::domain::network::topology_trait::MoteTopology;
use crate::domain::scheduler::link_store::LinkStore;
use crate::domain::utils::id::MoteId;
use crate::error::Result;

/// Transmission demand of one mote towards its parent for the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDemand {
    pub sender: MoteId,
    pub receiver: MoteId,
    pub demand: u32,
}

/// Parent chosen for a mote and whether other neighbors had the same rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentSelection {
    pub parent: MoteId,
    pub is_ambiguous: bool,
}

/// Output of the demand builder, including the diagnostics that do not stop a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandReport {
    /// Ordered by sender id.
    pub demands: Vec<LinkDemand>,

    /// Motes whose parent was picked among several neighbors of equal lowest rank.
    pub ambiguous_parents: Vec<MoteId>,

    /// Non-root motes without usable neighbors but with traffic to send.
    pub isolated_motes: Vec<MoteId>,

    /// Packets of isolated motes that cannot be scheduled this run.
    pub dropped_demand: u64,
}

impl DemandReport {
    pub fn total_demand(&self) -> u64 {
        self.demands.iter().map(|demand| demand.demand as u64).sum()
    }

    /// Creates one link per demand, with ids assigned in demand order.
    pub fn into_link_store(&self) -> LinkStore {
        let mut store = LinkStore::new();
        for demand in &self.demands {
            store.add(demand.sender, demand.receiver, demand.demand);
        }
        store
    }
}

/// Derives per-link demand from topology and per-mote packet generation.
pub struct DemandBuilder;

impl DemandBuilder {
    /// Aggregates relayed traffic towards the root and emits one demand per non-root mote
    /// that has a parent.
    ///
    /// ### Algorithm Logic
    /// 1. Relayed counters from earlier runs are reset, so every mote starts at its own generation.
    /// 2. Non-root motes are visited by rank, highest first (ties by ascending id). Each one adds
    ///    its pending count to its parent, unless the parent is the root. Children are therefore
    ///    always folded into a parent before the parent forwards its own total.
    /// 3. A second pass by ascending id emits `(mote, parent, pending count)` for every non-root
    ///    mote with a parent.
    pub fn build<T: MoteTopology + ?Sized>(topology: &mut T) -> Result<DemandReport> {
        topology.reset_relayed_demand();

        let mut by_rank: Vec<(u32, MoteId)> = Vec::new();
        for mote in topology.mote_ids() {
            if !topology.is_root(mote) {
                by_rank.push((topology.rank(mote)?, mote));
            }
        }
        by_rank.sort_by(|(rank_a, id_a), (rank_b, id_b)| rank_b.cmp(rank_a).then(id_a.cmp(id_b)));

        for &(_, mote) in &by_rank {
            let Some(selection) = Self::select_parent(topology, mote)? else {
                continue;
            };

            if topology.is_root(selection.parent) {
                continue;
            }

            let amount = topology.pending_count(mote)?;
            if amount > 0 {
                topology.increase_pending_count(selection.parent, amount)?;
                log::trace!("Mote {} relays {} packets through parent {}.", mote, amount, selection.parent);
            }
        }

        let mut report = DemandReport::default();

        for mote in topology.mote_ids() {
            if topology.is_root(mote) {
                continue;
            }

            let pending = topology.pending_count(mote)?;

            match Self::select_parent(topology, mote)? {
                Some(selection) => {
                    if selection.is_ambiguous {
                        log::debug!("Mote {} has several neighbors with the lowest rank, picked {} as parent.", mote, selection.parent);
                        report.ambiguous_parents.push(mote);
                    }

                    report.demands.push(LinkDemand { sender: mote, receiver: selection.parent, demand: pending });
                }
                None => {
                    if pending > 0 {
                        log::warn!("Mote {} has no neighbors, {} packets are dropped for this run.", mote, pending);
                        report.isolated_motes.push(mote);
                        report.dropped_demand += pending as u64;
                    }
                }
            }
        }

        log::debug!(
            "Demand built: {} links, total demand {}, {} ambiguous parents, {} isolated motes.",
            report.demands.len(),
            report.total_demand(),
            report.ambiguous_parents.len(),
            report.isolated_motes.len()
        );

        Ok(report)
    }

    /// Picks the neighbor with the lowest rank. On a tie the first one in the mote's neighbor
    /// order wins. A mote listed among its own neighbors is ignored.
    ///
    /// # Returns
    /// `None` if the mote has no other neighbor.
    pub fn select_parent<T: MoteTopology + ?Sized>(topology: &T, mote: MoteId) -> Result<Option<ParentSelection>> {
        let mut best: Option<(u32, MoteId)> = None;
        let mut is_ambiguous = false;

        for neighbor in topology.neighbors(mote)? {
            if neighbor == mote {
                continue;
            }

            let rank = topology.rank(neighbor)?;

            match best {
                Some((best_rank, best_id)) if rank == best_rank && neighbor != best_id => is_ambiguous = true,
                Some((best_rank, _)) if rank >= best_rank => {}
                _ => {
                    best = Some((rank, neighbor));
                    is_ambiguous = false;
                }
            }
        }

        Ok(best.map(|(_, parent)| ParentSelection { parent, is_ambiguous }))
    }
}
