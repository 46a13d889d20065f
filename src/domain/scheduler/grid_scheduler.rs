use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::scheduler::compatibility::{self, are_compatible};
use crate::domain::scheduler::link::Link;
use crate::domain::scheduler::link_store::{LinkKey, LinkStore};
use crate::domain::scheduler::slot_frame::SlotFrame;

/// Greedy first-fit placement of link demand onto a channel × timeslot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridScheduler {
    num_channels: usize,
    num_timeslots: usize,
}

/// Orders links by scheduling priority: the link that should be served next compares as `Less`.
///
/// Most remaining demand first, then the least served so far, then the lowest id.
pub fn link_priority(a: &Link, b: &Link) -> Ordering {
    b.remaining_demand.cmp(&a.remaining_demand).then(a.scheduled_count.cmp(&b.scheduled_count)).then(a.id.cmp(&b.id))
}

impl GridScheduler {
    pub fn new(num_channels: usize, num_timeslots: usize) -> Self {
        Self { num_channels, num_timeslots }
    }

    /// Computes compatibility, places every unit of demand and shuffles channels per timeslot.
    pub fn schedule<R: Rng + ?Sized>(&self, store: &mut LinkStore, rng: &mut R) -> SlotFrame {
        let mut frame = self.place_links(store);
        Self::randomize_channels(&mut frame, rng);
        frame
    }

    /// Fills an empty frame with the links of `store`, without channel randomization.
    ///
    /// Every unit of remaining demand is consumed: it either occupies a cell or is counted as
    /// unmet demand of its link when no eligible cell is left.
    pub fn place_links(&self, store: &mut LinkStore) -> SlotFrame {
        let mut frame = SlotFrame::new(self.num_channels, self.num_timeslots);

        compatibility::analyze(store);

        let mut working: Vec<LinkKey> = store.keys().into_iter().filter(|key| store.get(*key).is_some_and(|link| !link.is_satisfied())).collect();

        while let Some(key) = Self::choose_next_link(store, &working) {
            let cell = Self::find_free_cell(&frame, store, key);

            if let Some((channel, timeslot)) = cell {
                frame.assign(channel, timeslot, key);
            }

            let Some(link) = store.get_mut(key) else {
                working.retain(|other| *other != key);
                continue;
            };

            match cell {
                Some((channel, timeslot)) => {
                    log::trace!("Link {} ({} -> {}) placed at channel {}, timeslot {}.", link.id, link.sender, link.receiver, channel, timeslot);
                    link.consume_demand_unit(true);
                }
                None => {
                    // Cells are never freed during placement, so no later unit of this link fits either.
                    let given_up = link.mark_remaining_unmet();
                    log::debug!("CapacityExhausted: no free cell left for link {} ({} -> {}), {} units unmet.", link.id, link.sender, link.receiver, given_up);
                }
            }

            if link.is_satisfied() {
                if link.unmet_demand > 0 {
                    log::warn!(
                        "Link {} ({} -> {}) could only place {} of {} cells.",
                        link.id,
                        link.sender,
                        link.receiver,
                        link.initial_demand - link.unmet_demand,
                        link.initial_demand
                    );
                }
                working.retain(|other| *other != key);
            }
        }

        frame
    }

    /// Re-evaluates all unsatisfied links and returns the one with the highest priority.
    pub fn choose_next_link(store: &LinkStore, working: &[LinkKey]) -> Option<LinkKey> {
        working
            .iter()
            .filter_map(|key| store.get(*key).map(|link| (*key, link)))
            .filter(|(_, link)| !link.is_satisfied())
            .min_by(|(_, a), (_, b)| link_priority(a, b))
            .map(|(key, _)| key)
    }

    /// First eligible cell in timeslot-major, channel-minor order.
    pub fn find_free_cell(frame: &SlotFrame, store: &LinkStore, key: LinkKey) -> Option<(usize, usize)> {
        for timeslot in 0..frame.num_timeslots() {
            if Self::has_conflict(frame, store, key, timeslot) {
                continue;
            }

            if let Some(channel) = (0..frame.num_channels()).find(|channel| frame.is_free(*channel, timeslot)) {
                return Some((channel, timeslot));
            }
        }

        None
    }

    /// True if the link is already in the timeslot or is incompatible with a link placed there.
    pub fn has_conflict(frame: &SlotFrame, store: &LinkStore, key: LinkKey, timeslot: usize) -> bool {
        let Some(link) = store.get(key) else {
            return true;
        };

        frame.links_in_timeslot(timeslot).any(|other| other == key || !link.is_compatible(other))
    }

    /// Applies an independent, uniformly drawn channel permutation to every timeslot.
    pub fn randomize_channels<R: Rng + ?Sized>(frame: &mut SlotFrame, rng: &mut R) {
        let mut permutation: Vec<usize> = (0..frame.num_channels()).collect();

        for timeslot in 0..frame.num_timeslots() {
            permutation.shuffle(rng);
            let remapped = frame.permute_timeslot(timeslot, &permutation);
            debug_assert!(remapped, "shuffled channel list must be a permutation");
        }
    }

    /// Timeslots holding two links that share a mote. Empty for every frame built by this scheduler.
    pub fn conflicting_timeslots(frame: &SlotFrame, store: &LinkStore) -> Vec<usize> {
        (0..frame.num_timeslots())
            .filter(|timeslot| {
                let links: Vec<&Link> = frame.links_in_timeslot(*timeslot).filter_map(|key| store.get(key)).collect();

                links.iter().enumerate().any(|(i, a)| links.iter().skip(i + 1).any(|b| a.id == b.id || !are_compatible(a, b)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::utils::id::MoteId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mote(id: u32) -> MoteId {
        MoteId::new(id)
    }

    #[test]
    fn priority_prefers_remaining_then_least_served_then_id() {
        let mut store = LinkStore::new();
        let a = store.add(mote(1), mote(0), 3);
        let b = store.add(mote(2), mote(0), 3);
        let c = store.add(mote(3), mote(0), 2);

        let working = vec![c, b, a];
        assert_eq!(GridScheduler::choose_next_link(&store, &working), Some(a), "tie on remaining and served goes to the lowest id");

        store.get_mut(a).unwrap().consume_demand_unit(true);
        // a: 2 remaining / 1 served, b: 3 / 0, c: 2 / 0
        assert_eq!(GridScheduler::choose_next_link(&store, &working), Some(b));

        store.get_mut(b).unwrap().consume_demand_unit(true);
        // a: 2 / 1, b: 2 / 1, c: 2 / 0
        assert_eq!(GridScheduler::choose_next_link(&store, &working), Some(c));
    }

    #[test]
    fn conflicting_links_are_spread_over_timeslots() {
        let mut store = LinkStore::new();
        let a = store.add(mote(1), mote(0), 1);
        let b = store.add(mote(2), mote(0), 1);
        let c = store.add(mote(4), mote(3), 1);

        let frame = GridScheduler::new(4, 4).place_links(&mut store);

        assert_eq!(frame.get(0, 0), Some(a));
        assert_eq!(frame.get(1, 0), Some(c), "c shares no mote with a and joins timeslot 0");
        assert_eq!(frame.get(0, 1), Some(b), "b shares the root with a");
        assert!(GridScheduler::conflicting_timeslots(&frame, &store).is_empty());
    }

    #[test]
    fn unplaceable_units_become_unmet_demand() {
        let mut store = LinkStore::new();
        let a = store.add(mote(1), mote(0), 5);

        // A link cannot occupy two channels of the same timeslot, so 3 timeslots fit 3 units.
        let frame = GridScheduler::new(2, 3).place_links(&mut store);
        let link = store.get(a).unwrap();

        assert_eq!(frame.placed_count(a), 3);
        assert_eq!(link.unmet_demand, 2);
        assert_eq!(link.scheduled_count, 5);
        assert!(link.is_satisfied());
    }

    #[test]
    fn huge_demand_is_settled_without_a_scan_per_unit() {
        let mut store = LinkStore::new();
        let big = store.add(mote(1), mote(0), u32::MAX);
        let other = store.add(mote(3), mote(2), 2);

        let frame = GridScheduler::new(2, 4).place_links(&mut store);

        assert_eq!(frame.placed_count(big), 4);
        assert_eq!(store.get(big).unwrap().unmet_demand, u32::MAX - 4);
        assert_eq!(frame.placed_count(other), 2, "the giant link does not starve unrelated links");
        assert_eq!(store.get(other).unwrap().unmet_demand, 0);
    }

    #[test]
    fn giving_up_early_matches_unit_by_unit_placement() {
        let mut store = LinkStore::new();
        let a = store.add(mote(1), mote(0), 6);
        let b = store.add(mote(2), mote(0), 4);
        let c = store.add(mote(4), mote(3), 3);
        let frame = GridScheduler::new(2, 5).place_links(&mut store);

        // Unit by unit: a fails only after every timeslot holds a or b.
        let mut reference = LinkStore::new();
        for (sender, receiver, demand) in [(1, 0, 6), (2, 0, 4), (4, 3, 3)] {
            reference.add(mote(sender), mote(receiver), demand);
        }
        compatibility::analyze(&mut reference);
        let mut expected = SlotFrame::new(2, 5);
        let mut working = reference.keys();
        while let Some(key) = GridScheduler::choose_next_link(&reference, &working) {
            let cell = GridScheduler::find_free_cell(&expected, &reference, key);
            if let Some((channel, timeslot)) = cell {
                expected.assign(channel, timeslot, key);
            }
            let link = reference.get_mut(key).unwrap();
            link.consume_demand_unit(cell.is_some());
            if link.is_satisfied() {
                working.retain(|other| *other != key);
            }
        }

        assert_eq!(frame, expected);
        for key in [a, b, c] {
            assert_eq!(store.get(key).unwrap().unmet_demand, reference.get(key).unwrap().unmet_demand);
        }
        assert_eq!(store.get(a).unwrap().unmet_demand + store.get(b).unwrap().unmet_demand, 5);
    }

    #[test]
    fn randomization_keeps_each_column_content() {
        let mut store = LinkStore::new();
        for sender in 1..=6 {
            store.add(mote(sender * 10), mote(sender * 10 + 1), 2);
        }

        let frame = GridScheduler::new(8, 4).place_links(&mut store);
        let mut shuffled = frame.clone();
        GridScheduler::randomize_channels(&mut shuffled, &mut StdRng::seed_from_u64(11));

        for timeslot in 0..frame.num_timeslots() {
            let mut before: Vec<LinkKey> = frame.links_in_timeslot(timeslot).collect();
            let mut after: Vec<LinkKey> = shuffled.links_in_timeslot(timeslot).collect();
            before.sort();
            after.sort();
            assert_eq!(before, after, "timeslot {} lost or gained links", timeslot);
        }
    }
}
