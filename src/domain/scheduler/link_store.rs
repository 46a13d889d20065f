use slotmap::{SlotMap, new_key_type};

use crate::domain::scheduler::link::{Link, LinkInfo};
use crate::domain::utils::id::{LinkId, MoteId};

new_key_type! {
    pub struct LinkKey;
}

/// Arena owning all links of one scheduling run.
///
/// The slot frame only stores `LinkKey`s, so nothing can outlive the run that created the links.
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    links: SlotMap<LinkKey, Link>,

    /// Id handed to the next link; ids start at 1 in every run.
    next_id: u32,
}

impl LinkStore {
    pub fn new() -> Self {
        Self { links: SlotMap::with_key(), next_id: 1 }
    }

    /// Adds a new link with a fresh sequential id.
    ///
    /// # Returns
    /// Returns the LinkKey (internal key of the arena).
    pub fn add(&mut self, sender: MoteId, receiver: MoteId, demand: u32) -> LinkKey {
        let id = LinkId::new(self.next_id.max(1));
        self.next_id = id.id + 1;

        self.links.insert(Link::new(id, sender, receiver, demand))
    }

    pub fn get(&self, key: LinkKey) -> Option<&Link> {
        self.links.get(key)
    }

    pub fn get_mut(&mut self, key: LinkKey) -> Option<&mut Link> {
        self.links.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All keys ordered by link id.
    pub fn keys(&self) -> Vec<LinkKey> {
        let mut keys: Vec<(LinkId, LinkKey)> = self.links.iter().map(|(key, link)| (link.id, key)).collect();
        keys.sort();
        keys.into_iter().map(|(_, key)| key).collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LinkKey, &mut Link)> {
        self.links.iter_mut()
    }

    /// Snapshot of every link ordered by id. `placed_cells` reports how many grid cells a link occupies.
    pub fn infos(&self, placed_cells: impl Fn(LinkKey) -> usize) -> Vec<LinkInfo> {
        self.keys()
            .into_iter()
            .filter_map(|key| {
                self.links.get(key).map(|link| LinkInfo {
                    id: link.id,
                    sender: link.sender,
                    receiver: link.receiver,
                    initial_demand: link.initial_demand,
                    scheduled_count: link.scheduled_count,
                    placed: placed_cells(key) as u32,
                    unmet_demand: link.unmet_demand,
                })
            })
            .collect()
    }
}
