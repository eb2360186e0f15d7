use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use dashmap::DashSet;
use fastpay_core::{ChannelId, GraphSnapshot, NodeId};

/// One direction of a channel, stored on the node it leads out of.
///
/// Each physical channel produces exactly two of these, one per endpoint,
/// each carrying that direction's own fee and time-lock policy. Capacity is
/// shared between directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedChannel {
    pub id: ChannelId,
    /// The node this channel leads to.
    pub peer_id: NodeId,
    pub fee_base_msat: u64,
    pub fee_rate_milli_msat: u64,
    pub cltv_delta: u32,
    pub capacity_sat: u64,
}

impl DirectedChannel {
    /// Forwarding fee for `amount_msat`, in millisatoshi:
    /// `fee_base_msat + floor(amount_msat * fee_rate_milli_msat / 1_000_000)`.
    pub fn fee_msat(&self, amount_msat: u64) -> u64 {
        let proportional =
            (u128::from(amount_msat) * u128::from(self.fee_rate_milli_msat)) / 1_000_000;
        self.fee_base_msat
            .saturating_add(u64::try_from(proportional).unwrap_or(u64::MAX))
    }
}

/// A node and its outgoing channels.
///
/// The channel list is kept sorted non-increasing by capacity, tie-broken by
/// ascending channel id. The search's capacity filter stops at the first
/// under-capacity channel and is only correct under this ordering.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: NodeId,
    pub alias: String,
    pub channels: Vec<DirectedChannel>,
}

/// An immutable channel graph built from one snapshot.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, GraphNode>,
    directed_channel_count: usize,
}

impl Graph {
    /// Build a graph from a wholesale snapshot.
    ///
    /// Channel records referencing a node absent from the snapshot's node
    /// list are skipped with a warning; the snapshot may legitimately
    /// reference nodes outside the fetched node set.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut nodes: HashMap<NodeId, GraphNode> = snapshot
            .nodes
            .iter()
            .map(|record| {
                (
                    record.id.clone(),
                    GraphNode {
                        id: record.id.clone(),
                        alias: record.alias.clone(),
                        channels: Vec::new(),
                    },
                )
            })
            .collect();

        let mut directed_channel_count = 0;
        for channel in &snapshot.channels {
            if !nodes.contains_key(&channel.node1_id) {
                tracing::warn!(
                    channel = %channel.id,
                    node = %channel.node1_id,
                    "snapshot references unknown node, skipping channel"
                );
                continue;
            }
            if !nodes.contains_key(&channel.node2_id) {
                tracing::warn!(
                    channel = %channel.id,
                    node = %channel.node2_id,
                    "snapshot references unknown node, skipping channel"
                );
                continue;
            }

            if let Some(node1) = nodes.get_mut(&channel.node1_id) {
                node1.channels.push(DirectedChannel {
                    id: channel.id.clone(),
                    peer_id: channel.node2_id.clone(),
                    fee_base_msat: channel.node2_policy.fee_base_msat,
                    fee_rate_milli_msat: channel.node2_policy.fee_rate_milli_msat,
                    cltv_delta: channel.node2_policy.time_lock_delta,
                    capacity_sat: channel.capacity_sat,
                });
            }
            if let Some(node2) = nodes.get_mut(&channel.node2_id) {
                node2.channels.push(DirectedChannel {
                    id: channel.id.clone(),
                    peer_id: channel.node1_id.clone(),
                    fee_base_msat: channel.node1_policy.fee_base_msat,
                    fee_rate_milli_msat: channel.node1_policy.fee_rate_milli_msat,
                    cltv_delta: channel.node1_policy.time_lock_delta,
                    capacity_sat: channel.capacity_sat,
                });
            }
            directed_channel_count += 2;
        }

        // Capacity-descending with a deterministic tie-break: the search
        // relies on this ordering to cut off at the first under-capacity
        // channel.
        for node in nodes.values_mut() {
            node.channels.sort_by(|a, b| {
                b.capacity_sat
                    .cmp(&a.capacity_sat)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        Self {
            nodes,
            directed_channel_count,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed channel records (two per physical channel).
    pub fn directed_channel_count(&self) -> usize {
        self.directed_channel_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Shared owner of the current graph and the process-lifetime ban list.
///
/// `update` builds a complete new [`Graph`] off to the side and swaps it in
/// with a single `Arc` replacement, so an in-flight search keeps traversing
/// the snapshot it started on. The ban list is mutated independently and is
/// never reset by `update`; additions take effect for subsequent searches.
pub struct GraphStore {
    graph: RwLock<Arc<Graph>>,
    banned: DashSet<ChannelId>,
    last_updated: RwLock<Option<DateTime<Utc>>>,
}

impl GraphStore {
    /// Create a store holding an empty graph.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(Arc::new(Graph::default())),
            banned: DashSet::new(),
            last_updated: RwLock::new(None),
        }
    }

    /// Replace the entire graph from a snapshot.
    pub fn update(&self, snapshot: &GraphSnapshot) {
        let graph = Arc::new(Graph::from_snapshot(snapshot));
        tracing::info!(
            nodes = graph.node_count(),
            directed_channels = graph.directed_channel_count(),
            "channel graph updated"
        );
        *write_lock(&self.graph) = graph;
        *write_lock(&self.last_updated) = Some(Utc::now());
    }

    /// The current graph snapshot. The returned `Arc` stays valid across
    /// later `update` calls.
    pub fn current(&self) -> Arc<Graph> {
        read_lock(&self.graph).clone()
    }

    /// When the graph was last replaced, if ever.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *read_lock(&self.last_updated)
    }

    /// Exclude a channel from every future search. Returns `false` if it was
    /// already banned.
    pub fn ban_channel(&self, id: ChannelId) -> bool {
        let inserted = self.banned.insert(id.clone());
        if inserted {
            tracing::info!(channel = %id, "channel banned");
        }
        inserted
    }

    pub fn is_banned(&self, id: &ChannelId) -> bool {
        self.banned.contains(id)
    }

    pub fn banned_count(&self) -> usize {
        self.banned.len()
    }

    pub(crate) fn banned_set(&self) -> &DashSet<ChannelId> {
        &self.banned
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

// The guarded values are a pointer and a timestamp; no invariant can be left
// half-written by a panicking writer, so a poisoned lock is safe to reuse.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
