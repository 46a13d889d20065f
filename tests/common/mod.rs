#![allow(dead_code)]

use tsch_scheduler::domain::network::mote::Mote;
use tsch_scheduler::domain::network::network::Network;
use tsch_scheduler::domain::settings::SimSettings;
use tsch_scheduler::domain::utils::id::MoteId;

pub const ROOT: u32 = 0;

pub fn id(id: u32) -> MoteId {
    MoteId::new(id)
}

/// Collects motes and builds a validated network, the root (id 0, rank 0) is added automatically.
pub struct NetworkBuilder {
    motes: Vec<Mote>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self { motes: vec![Mote::new(id(ROOT), 0, Vec::new(), 0, false)] }
    }

    pub fn mote(mut self, mote_id: u32, rank: u32, neighbors: &[u32], packets: u32) -> Self {
        self.motes.push(Mote::new(id(mote_id), rank, neighbors.iter().copied().map(MoteId::new).collect(), packets, false));
        self
    }

    pub fn build(self) -> Network {
        Network::new(self.motes).expect("test network must be valid")
    }
}

/// Root, A(1) under root with 2 packets, B(2) under A with 1 packet, C(3) under root with 1 packet.
pub fn four_mote_network() -> Network {
    NetworkBuilder::new().mote(1, 1, &[0], 2).mote(2, 2, &[1], 1).mote(3, 1, &[0], 1).build()
}

/// Linear chain 0 <- 1 <- 2 <- ... <- n, every mote generating `packets`.
pub fn chain_network(length: u32, packets: u32) -> Network {
    let mut builder = NetworkBuilder::new();
    for mote_id in 1..=length {
        builder = builder.mote(mote_id, mote_id, &[mote_id - 1], packets);
    }
    builder.build()
}

pub fn settings(num_channels: i64, slotframe_length: i64) -> SimSettings {
    SimSettings::new(num_channels, slotframe_length, 10_000, 2).expect("test settings must be valid").with_seed(42)
}
