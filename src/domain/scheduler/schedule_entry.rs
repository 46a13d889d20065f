use std::fmt;

use crate::domain::utils::id::MoteId;

/// Whether a mote transmits or listens in a scheduled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Tx,
    Rx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Tx => write!(f, "TX"),
            Direction::Rx => write!(f, "RX"),
        }
    }
}

/// One cell of a mote's published schedule.
///
/// Entries are plain copies: once handed to a mote they no longer depend on the
/// scheduling run that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleEntry {
    pub timeslot: usize,
    pub direction: Direction,
    pub neighbor: MoteId,
    pub channel: usize,
}

impl ScheduleEntry {
    pub fn new(timeslot: usize, direction: Direction, neighbor: MoteId, channel: usize) -> Self {
        Self { timeslot, direction, neighbor, channel }
    }
}
