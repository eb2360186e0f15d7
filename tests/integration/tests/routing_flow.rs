//! Integration test: full snapshot → graph → route → annotation flow.
//!
//! Exercises fastpay-core snapshot ingestion together with the
//! fastpay-routing graph store, router, and time-lock annotator, the way an
//! RPC-facing caller would drive them.

use std::collections::HashSet;
use std::sync::Arc;

use fastpay_core::GraphSnapshot;
use fastpay_routing::{assign_expiries, GraphStore, Router, RoutingError};

/// A four-node line A - B - C - D with per-direction fee asymmetry, as it
/// would arrive from a graph-describing RPC call.
fn snapshot_json() -> serde_json::Value {
    serde_json::json!({
        "nodes": [
            {"id": "A", "alias": "alice"},
            {"id": "B", "alias": "bob"},
            {"id": "C", "alias": "carol"},
            {"id": "D", "alias": "dave"},
            {"id": "ghost", "alias": "not-in-channel-list"}
        ],
        "channels": [
            {
                "id": "ch-ab", "node1_id": "A", "node2_id": "B", "capacity_sat": 100_000,
                "node1_policy": {"fee_base_msat": 1000, "fee_rate_milli_msat": 1, "time_lock_delta": 40},
                "node2_policy": {"fee_base_msat": 800, "fee_rate_milli_msat": 1, "time_lock_delta": 40}
            },
            {
                "id": "ch-bc", "node1_id": "B", "node2_id": "C", "capacity_sat": 50_000,
                "node1_policy": {"fee_base_msat": 700, "fee_rate_milli_msat": 0, "time_lock_delta": 30},
                "node2_policy": {"fee_base_msat": 500, "fee_rate_milli_msat": 0, "time_lock_delta": 20}
            },
            {
                "id": "ch-cd", "node1_id": "C", "node2_id": "D", "capacity_sat": 80_000,
                "node1_policy": {"fee_base_msat": 900, "fee_rate_milli_msat": 0, "time_lock_delta": 35},
                "node2_policy": {"fee_base_msat": 600, "fee_rate_milli_msat": 0, "time_lock_delta": 25}
            },
            {
                "id": "ch-dangling", "node1_id": "A", "node2_id": "unknown-node", "capacity_sat": 10_000,
                "node1_policy": {"fee_base_msat": 0, "fee_rate_milli_msat": 0, "time_lock_delta": 0},
                "node2_policy": {"fee_base_msat": 0, "fee_rate_milli_msat": 0, "time_lock_delta": 0}
            }
        ]
    })
}

fn router() -> Router {
    let snapshot: GraphSnapshot = serde_json::from_value(snapshot_json()).unwrap();
    let store = Arc::new(GraphStore::new());
    store.update(&snapshot);
    Router::with_defaults(store)
}

// =========================================================================
// Snapshot → search → convert → annotate
// =========================================================================

#[test]
fn test_route_end_to_end() {
    let router = router();

    // The dangling channel was skipped, the rest loaded.
    let graph = router.store().current();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.directed_channel_count(), 6);
    assert!(router.store().last_updated().is_some());

    let mut route = router
        .find_route(&"A".into(), &"D".into(), 10_000, &HashSet::new())
        .unwrap()
        .expect("A reaches D in three hops");

    assert_eq!(route.hop_count(), 3);
    assert_eq!(route.source, Some("A".into()));

    // Destination-adjacent hop: exactly the requested amount, priced by the
    // C->D direction's policy.
    assert_eq!(route.hops[2].peer_id, "D".into());
    assert_eq!(route.hops[2].amount_msat, 10_000_000);
    assert_eq!(route.hops[2].fee_msat, 600);

    // Middle hop: B->C direction's policy on what it forwards.
    assert_eq!(route.hops[1].amount_msat, 10_000_600);
    assert_eq!(route.hops[1].fee_msat, 500);

    // Source-adjacent hop: all downstream fees baked in, no fee of its own.
    assert_eq!(route.hops[0].amount_msat, 10_001_100);
    assert_eq!(route.hops[0].fee_msat, 0);

    assert_eq!(route.total_amount_msat, 10_001_100);
    assert_eq!(route.total_fees_msat, 1_100);

    assign_expiries(&mut route, 700_000, 9);
    assert_eq!(route.hops[2].expiry, 700_009);
    assert_eq!(route.hops[1].expiry, 700_009 + 25);
    assert_eq!(route.hops[0].expiry, 700_009 + 25 + 20);
    assert_eq!(route.total_time_lock, route.hops[0].expiry);
}

#[test]
fn test_not_found_cases_are_soft() {
    let router = router();

    // Amount above the B-C bottleneck.
    assert!(router
        .find_route(&"A".into(), &"D".into(), 60_000, &HashSet::new())
        .unwrap()
        .is_none());

    // Per-call exclusion of the only corridor.
    let excluded = ["ch-bc".into()].into_iter().collect();
    assert!(router
        .find_route(&"A".into(), &"D".into(), 10_000, &excluded)
        .unwrap()
        .is_none());
}

// =========================================================================
// Ban lifecycle
// =========================================================================

#[test]
fn test_ban_blocks_search_but_not_manual_build() {
    let router = router();
    router.store().ban_channel("ch-bc".into());

    assert!(router
        .find_route(&"A".into(), &"D".into(), 10_000, &HashSet::new())
        .unwrap()
        .is_none());

    // An operator-directed build bypasses search-level policy.
    let route = router
        .build_route(
            &"A".into(),
            &["ch-ab".into(), "ch-bc".into(), "ch-cd".into()],
            10_000,
        )
        .unwrap();
    assert_eq!(route.hop_count(), 3);
    assert_eq!(route.total_fees_msat, 1_100);
}

#[test]
fn test_ban_survives_snapshot_refresh() {
    let router = router();
    router.store().ban_channel("ch-bc".into());

    let snapshot: GraphSnapshot = serde_json::from_value(snapshot_json()).unwrap();
    router.store().update(&snapshot);

    assert!(router.store().is_banned(&"ch-bc".into()));
    assert!(router
        .find_route(&"A".into(), &"D".into(), 10_000, &HashSet::new())
        .unwrap()
        .is_none());
}

// =========================================================================
// Fatal-error surface
// =========================================================================

#[test]
fn test_unknown_identifiers_are_fatal() {
    let router = router();

    assert!(matches!(
        router.find_route(&"missing".into(), &"D".into(), 10_000, &HashSet::new()),
        Err(RoutingError::UnknownNode { .. })
    ));

    assert!(matches!(
        router.build_route(&"A".into(), &["ch-cd".into()], 10_000),
        Err(RoutingError::UnknownChannel { .. })
    ));
}

#[test]
fn test_most_capacious_is_reported_unimplemented() {
    let router = router();
    let result = router.find_most_capacious(&"A".into(), &"D".into());
    assert!(
        matches!(result, Err(RoutingError::NotImplemented { .. })),
        "must be distinguishable from a soft not-found"
    );
}
