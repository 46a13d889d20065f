use crate::domain::scheduler::link::Link;
use crate::domain::scheduler::link_store::{LinkKey, LinkStore};
use crate::domain::utils::id::MoteId;

/// Two links may share a timeslot (on different channels) when no mote takes part in both:
/// every mote has a single half-duplex radio.
pub fn are_compatible(a: &Link, b: &Link) -> bool {
    !a.shares_mote(b)
}

/// Computes the symmetric compatibility relation for every pair of links in the store.
///
/// Previous compatibility sets are discarded first, so the relation always reflects the
/// current batch. A link is never compatible with itself.
///
/// # Returns
/// The number of compatible (unordered) pairs.
pub fn analyze(store: &mut LinkStore) -> usize {
    let endpoints: Vec<(LinkKey, MoteId, MoteId)> = store.keys().into_iter().filter_map(|key| store.get(key).map(|link| (key, link.sender, link.receiver))).collect();

    for (_, link) in store.iter_mut() {
        link.clear_compatible_links();
    }

    let mut compatible_pairs = 0;

    for (i, &(key_a, send_a, rcv_a)) in endpoints.iter().enumerate() {
        for &(key_b, send_b, rcv_b) in endpoints.iter().skip(i + 1) {
            let shares_mote = send_a == send_b || send_a == rcv_b || rcv_a == send_b || rcv_a == rcv_b;

            if shares_mote {
                continue;
            }

            if let Some(link) = store.get_mut(key_a) {
                link.add_compatible_link(key_b);
            }
            if let Some(link) = store.get_mut(key_b) {
                link.add_compatible_link(key_a);
            }
            compatible_pairs += 1;
        }
    }

    log::debug!("Compatibility analysis: {} links, {} compatible pairs.", endpoints.len(), compatible_pairs);

    compatible_pairs
}
