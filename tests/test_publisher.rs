mod common;

use common::{NetworkBuilder, id};
use tsch_scheduler::domain::network::topology_trait::MoteTopology;
use tsch_scheduler::domain::scheduler::link_store::LinkStore;
use tsch_scheduler::domain::scheduler::publisher::SchedulePublisher;
use tsch_scheduler::domain::scheduler::schedule_entry::{Direction, ScheduleEntry};
use tsch_scheduler::domain::scheduler::slot_frame::SlotFrame;
use tsch_scheduler::error::Error;

#[test]
fn placed_cell_becomes_tx_and_rx_entry() {
    let mut store = LinkStore::new();
    let key = store.add(id(1), id(0), 1);
    let mut frame = SlotFrame::new(2, 5);
    assert!(frame.assign(1, 3, key));

    let schedule = SchedulePublisher::build(&frame, &store, 5);

    assert_eq!(schedule.entries_for(id(1)), &[ScheduleEntry::new(3, Direction::Tx, id(0), 1)]);
    assert_eq!(schedule.entries_for(id(0)), &[ScheduleEntry::new(3, Direction::Rx, id(1), 1)]);
    assert_eq!(schedule.used_length, 4);
    assert_eq!(schedule.slotframe_length, 5);
    assert_eq!(schedule.num_entries(), 2);
}

#[test]
fn published_length_is_the_nominal_frame_length() {
    let mut store = LinkStore::new();
    let key = store.add(id(2), id(1), 1);
    let mut frame = SlotFrame::new(1, 100);
    frame.assign(0, 0, key);

    let schedule = SchedulePublisher::build(&frame, &store, 100);

    assert_eq!(schedule.used_length, 1);
    assert_eq!(schedule.slotframe_length, 100);
}

#[test]
fn motes_without_entries_keep_their_schedule() {
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 1).mote(2, 1, &[0], 1).build();
    let old_entry = ScheduleEntry::new(7, Direction::Tx, id(0), 2);
    network.assign_schedule(id(2), vec![old_entry], 50).unwrap();

    let mut store = LinkStore::new();
    let key = store.add(id(1), id(0), 1);
    let mut frame = SlotFrame::new(1, 10);
    frame.assign(0, 0, key);

    let schedule = SchedulePublisher::build(&frame, &store, 10);
    let updated = SchedulePublisher::publish(&schedule, &mut network).unwrap();

    assert_eq!(updated, 2);
    assert_eq!(network.mote(id(2)).unwrap().schedule(), &[old_entry]);
    assert_eq!(network.mote(id(2)).unwrap().slotframe_length(), 50);
    assert_eq!(network.mote(id(1)).unwrap().slotframe_length(), 10);
}

#[test]
fn empty_frame_publishes_nothing() {
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 0).build();
    let schedule = SchedulePublisher::build(&SlotFrame::new(4, 10), &LinkStore::new(), 10);

    assert_eq!(SchedulePublisher::publish(&schedule, &mut network).unwrap(), 0);
    assert_eq!(schedule.used_length, 0);
    assert!(network.mote(id(1)).unwrap().schedule().is_empty());
}

#[test]
fn unknown_mote_leaves_every_schedule_untouched() {
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 1).build();
    let old_entry = ScheduleEntry::new(2, Direction::Tx, id(0), 0);
    network.assign_schedule(id(1), vec![old_entry], 10).unwrap();

    let mut store = LinkStore::new();
    let known = store.add(id(1), id(0), 1);
    let stranger = store.add(id(9), id(8), 1);
    let mut frame = SlotFrame::new(2, 10);
    frame.assign(0, 0, known);
    frame.assign(1, 0, stranger);

    let schedule = SchedulePublisher::build(&frame, &store, 10);
    let result = SchedulePublisher::publish(&schedule, &mut network);

    assert!(matches!(result, Err(Error::UnknownMote(mote)) if mote == id(8)), "motes are checked in id order");
    assert_eq!(network.mote(id(1)).unwrap().schedule(), &[old_entry]);
    assert!(network.mote(id(0)).unwrap().schedule().is_empty());
}
