use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::domain::simulator::simulator::{Asn, SimEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub asn: Asn,

    /// Lower values are dispatched first among events of the same ASN.
    pub priority: i32,

    /// Insertion counter, keeps dispatch order stable for equal `(asn, priority)`.
    seq: u64,

    pub event: SimEvent,
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.asn.cmp(&other.asn).then(self.priority.cmp(&other.priority)).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending events ordered by ASN, then priority, then insertion.
///
/// Each event kind is unique in the queue: scheduling an event replaces a pending one of the same kind.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, asn: Asn, priority: i32, event: SimEvent) {
        let before = self.heap.len();
        self.heap.retain(|Reverse(pending)| pending.event != event);

        if self.heap.len() != before {
            log::trace!("Replaced pending {:?} event.", event);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(ScheduledEvent { asn, priority, seq, event }));
    }

    pub fn pop(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    pub fn peek(&self) -> Option<&ScheduledEvent> {
        self.heap.peek().map(|Reverse(event)| event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
