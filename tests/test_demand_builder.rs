mod common;

use common::{NetworkBuilder, chain_network, four_mote_network, id};
use tsch_scheduler::domain::network::topology_trait::MoteTopology;
use tsch_scheduler::domain::scheduler::demand::{DemandBuilder, LinkDemand};

fn demand(sender: u32, receiver: u32, demand: u32) -> LinkDemand {
    LinkDemand { sender: id(sender), receiver: id(receiver), demand }
}

#[test]
fn four_mote_scenario_aggregates_through_a() {
    let mut network = four_mote_network();

    let report = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(report.demands, vec![demand(1, 0, 3), demand(2, 1, 1), demand(3, 0, 1)]);
    assert_eq!(report.total_demand(), 5);
    assert!(report.ambiguous_parents.is_empty());
    assert!(report.isolated_motes.is_empty());

    // The root only receives, it never accumulates relayed traffic.
    assert_eq!(network.pending_count(id(0)).unwrap(), 0);
}

#[test]
fn chain_accumulates_every_descendant() {
    let mut network = chain_network(3, 1);

    let report = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(report.demands, vec![demand(1, 0, 3), demand(2, 1, 2), demand(3, 2, 1)]);
}

#[test]
fn rebuilding_does_not_double_count_relayed_traffic() {
    let mut network = chain_network(4, 2);

    let first = DemandBuilder::build(&mut network).unwrap();
    let second = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.demands[0], demand(1, 0, 8));
}

#[test]
fn equal_rank_parents_pick_the_first_neighbor() {
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 0).mote(2, 1, &[0], 0).mote(3, 2, &[2, 1], 1).build();

    let report = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(report.ambiguous_parents, vec![id(3)]);
    assert!(report.demands.contains(&demand(3, 2, 1)));
    assert!(report.demands.contains(&demand(2, 0, 1)));
    assert!(report.demands.contains(&demand(1, 0, 0)), "zero-demand links are still emitted");
}

#[test]
fn lowest_rank_wins_over_neighbor_order() {
    let network = NetworkBuilder::new().mote(1, 1, &[0], 0).mote(2, 2, &[1], 0).mote(3, 3, &[2, 1], 1).build();

    let selection = DemandBuilder::select_parent(&network, id(3)).unwrap().unwrap();

    assert_eq!(selection.parent, id(1));
    assert!(!selection.is_ambiguous);
}

#[test]
fn self_neighbor_is_ignored() {
    let network = NetworkBuilder::new().mote(1, 1, &[1, 0], 1).build();

    let selection = DemandBuilder::select_parent(&network, id(1)).unwrap().unwrap();

    assert_eq!(selection.parent, id(0));
}

#[test]
fn isolated_motes_are_reported_and_skipped() {
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 1).mote(5, 3, &[], 2).mote(6, 3, &[], 0).build();

    let report = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(report.demands, vec![demand(1, 0, 1)]);
    assert_eq!(report.isolated_motes, vec![id(5)], "isolated motes without traffic are not reported");
    assert_eq!(report.dropped_demand, 2);
}

#[test]
fn link_store_keeps_demand_order() {
    let mut network = four_mote_network();
    let report = DemandBuilder::build(&mut network).unwrap();

    let store = report.into_link_store();
    let links: Vec<_> = store.keys().into_iter().filter_map(|key| store.get(key)).collect();

    assert_eq!(links.len(), 3);
    assert_eq!(links[0].id.id, 1);
    assert_eq!((links[0].sender, links[0].receiver, links[0].remaining_demand), (id(1), id(0), 3));
    assert_eq!(links[2].sender, id(3));
}

#[test]
fn equal_rank_child_with_higher_id_is_not_forwarded_past_its_parent() {
    // 3 hangs below 2 but shares its rank. 2 is visited first and forwards only its own packet to 1.
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 1).mote(2, 2, &[1], 1).mote(3, 2, &[2], 1).build();

    let report = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(report.demands, vec![demand(1, 0, 2), demand(2, 1, 2), demand(3, 2, 1)]);
}

#[test]
fn equal_rank_child_with_lower_id_is_forwarded() {
    let mut network = NetworkBuilder::new().mote(1, 1, &[0], 1).mote(3, 2, &[1], 1).mote(2, 2, &[3], 1).build();

    let report = DemandBuilder::build(&mut network).unwrap();

    assert_eq!(report.demands, vec![demand(1, 0, 3), demand(2, 3, 1), demand(3, 1, 2)]);
}
