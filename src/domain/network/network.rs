use std::collections::BTreeMap;

use crate::api::simulation_dto::MoteDto;
use crate::domain::network::mote::Mote;
use crate::domain::network::topology_trait::MoteTopology;
use crate::domain::scheduler::schedule_entry::ScheduleEntry;
use crate::domain::utils::id::MoteId;
use crate::error::{Error, Result};

/// Id of the root when the scenario does not flag one explicitly.
pub const DEFAULT_ROOT_ID: MoteId = MoteId::new(0);

/// In-memory mesh used by the simulation. Motes are kept ordered by id so every pass over the
/// network is deterministic.
#[derive(Debug, Clone)]
pub struct Network {
    motes: BTreeMap<MoteId, Mote>,
    root: MoteId,
}

impl Network {
    /// Builds and validates a network.
    ///
    /// Mote ids must be unique, every neighbor must exist and at most one mote may be flagged
    /// as root. Without a flag, mote 0 becomes the root.
    pub fn new(motes: Vec<Mote>) -> Result<Self> {
        if motes.is_empty() {
            return Err(Error::Configuration("A network needs at least one mote.".to_string()));
        }

        let mut by_id: BTreeMap<MoteId, Mote> = BTreeMap::new();

        for mote in motes {
            let id = mote.id;
            if by_id.insert(id, mote).is_some() {
                return Err(Error::Configuration(format!("Mote id {} is used more than once.", id)));
            }
        }

        for mote in by_id.values() {
            if let Some(missing) = mote.neighbors.iter().find(|neighbor| !by_id.contains_key(neighbor)) {
                log::error!("Mote {} lists neighbor {} which is not part of the scenario.", mote.id, missing);
                return Err(Error::UnknownMote(*missing));
            }
        }

        let flagged_roots: Vec<MoteId> = by_id.values().filter(|mote| mote.is_root).map(|mote| mote.id).collect();

        let root = match flagged_roots.as_slice() {
            [] => {
                let root = by_id.get_mut(&DEFAULT_ROOT_ID).ok_or_else(|| {
                    Error::Configuration(format!("No mote is flagged as root and there is no mote with id {}.", DEFAULT_ROOT_ID))
                })?;
                root.is_root = true;
                DEFAULT_ROOT_ID
            }
            [root] => *root,
            _ => return Err(Error::Configuration(format!("Only one root is supported, found {:?}.", flagged_roots))),
        };

        log::debug!("Network with {} motes constructed, root is mote {}.", by_id.len(), root);

        Ok(Self { motes: by_id, root })
    }

    pub fn root(&self) -> MoteId {
        self.root
    }

    pub fn mote(&self, id: MoteId) -> Option<&Mote> {
        self.motes.get(&id)
    }

    pub fn motes(&self) -> impl Iterator<Item = &Mote> {
        self.motes.values()
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    fn get(&self, id: MoteId) -> Result<&Mote> {
        self.motes.get(&id).ok_or(Error::UnknownMote(id))
    }

    fn get_mut(&mut self, id: MoteId) -> Result<&mut Mote> {
        self.motes.get_mut(&id).ok_or(Error::UnknownMote(id))
    }
}

impl TryFrom<Vec<MoteDto>> for Network {
    type Error = Error;

    fn try_from(dtos: Vec<MoteDto>) -> Result<Self> {
        let motes = dtos
            .into_iter()
            .map(|dto| {
                Mote::new(MoteId::new(dto.id), dto.rank, dto.neighbors.into_iter().map(MoteId::new).collect(), dto.packets_per_epoch, dto.is_root)
            })
            .collect();

        Network::new(motes)
    }
}

impl MoteTopology for Network {
    fn mote_ids(&self) -> Vec<MoteId> {
        self.motes.keys().copied().collect()
    }

    fn contains(&self, mote: MoteId) -> bool {
        self.motes.contains_key(&mote)
    }

    fn is_root(&self, mote: MoteId) -> bool {
        mote == self.root
    }

    fn rank(&self, mote: MoteId) -> Result<u32> {
        Ok(self.get(mote)?.rank)
    }

    fn neighbors(&self, mote: MoteId) -> Result<Vec<MoteId>> {
        Ok(self.get(mote)?.neighbors.clone())
    }

    fn pending_count(&self, mote: MoteId) -> Result<u32> {
        Ok(self.get(mote)?.pending_count())
    }

    fn increase_pending_count(&mut self, mote: MoteId, amount: u32) -> Result<()> {
        self.get_mut(mote)?.increase_pending_count(amount);
        Ok(())
    }

    fn reset_relayed_demand(&mut self) {
        for mote in self.motes.values_mut() {
            mote.reset_relayed_packets();
        }
    }

    fn assign_schedule(&mut self, mote: MoteId, entries: Vec<ScheduleEntry>, slotframe_length: usize) -> Result<()> {
        self.get_mut(mote)?.assign_schedule(entries, slotframe_length);
        Ok(())
    }
}
