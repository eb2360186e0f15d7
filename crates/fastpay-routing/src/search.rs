use std::collections::HashSet;

use dashmap::DashSet;
use fastpay_core::{ChannelId, NodeId};

use crate::error::RoutingError;
use crate::graph::{DirectedChannel, Graph};

/// A capacity-feasible path as produced by the search.
///
/// Hops are stored back-to-front: the channel nearest the destination is
/// first, the channel nearest the source last. The recursion appends each
/// channel after its continuation has succeeded, so the list comes out in
/// that order naturally. Every downstream consumer depends on this
/// convention.
#[derive(Debug, Clone)]
pub struct RawPath {
    /// The amount the destination must end up receiving, in satoshi.
    pub amount_sat: u64,
    /// The node the path leaves from, tagged by the caller on success.
    pub origin: Option<NodeId>,
    pub hops: Vec<DirectedChannel>,
}

impl RawPath {
    /// An empty path carrying the target amount (the search's base case).
    pub fn empty(amount_sat: u64) -> Self {
        Self {
            amount_sat,
            origin: None,
            hops: Vec::new(),
        }
    }

    /// Compose a bridged path from the two halves of a common-node search:
    /// `first` covers source → bridge node, `second` covers bridge node →
    /// destination. Both halves are back-to-front, so the second half's hops
    /// (nearest the destination) come first in the composed path.
    pub fn bridge(origin: NodeId, first: RawPath, second: RawPath) -> Self {
        let mut hops = second.hops;
        hops.extend(first.hops);
        Self {
            amount_sat: first.amount_sat,
            origin: Some(origin),
            hops,
        }
    }
}

/// Depth-bounded backtracking search over one graph snapshot.
///
/// Borrows everything it needs for the duration of one route request; the
/// graph it holds cannot change underneath it even if the store is updated
/// concurrently.
pub struct PathSearch<'a> {
    graph: &'a Graph,
    banned: &'a DashSet<ChannelId>,
    excluded: &'a HashSet<ChannelId>,
    /// Channels above this capacity are skipped. Operational safety cap on
    /// single-hop capacity, not a protocol rule; see `RouterConfig`.
    capacity_ceiling_sat: Option<u64>,
}

impl<'a> PathSearch<'a> {
    pub fn new(
        graph: &'a Graph,
        banned: &'a DashSet<ChannelId>,
        excluded: &'a HashSet<ChannelId>,
        capacity_ceiling_sat: Option<u64>,
    ) -> Self {
        Self {
            graph,
            banned,
            excluded,
            capacity_ceiling_sat,
        }
    }

    /// Find a path from `from` to `to` able to carry `amount_sat`.
    ///
    /// `used` tracks the nodes on the current path for cycle avoidance; the
    /// marker for `from` is released on every exit, success and failure
    /// alike, so sibling branches never observe stale markers. `reached`
    /// accumulates every node the search enters and is only passed by
    /// top-level calls; bridging sub-searches pass `None`.
    ///
    /// Returns `Ok(None)` when no path exists within the constraints. An
    /// unresolvable `from` is a configuration error, not a miss.
    pub fn find(
        &self,
        from: &NodeId,
        to: &NodeId,
        amount_sat: u64,
        used: &mut HashSet<NodeId>,
        mut reached: Option<&mut HashSet<NodeId>>,
        depth: u32,
    ) -> Result<Option<RawPath>, RoutingError> {
        if from == to {
            return Ok(Some(RawPath::empty(amount_sat)));
        }

        if let Some(reached) = reached.as_deref_mut() {
            reached.insert(from.clone());
        }

        if depth == 0 {
            return Ok(None);
        }

        let node = self
            .graph
            .node(from)
            .ok_or_else(|| RoutingError::UnknownNode { id: from.clone() })?;

        used.insert(from.clone());

        for channel in &node.channels {
            // Channels are capacity-descending: once one is too small, all
            // remaining ones are too.
            if channel.capacity_sat < amount_sat {
                break;
            }
            if used.contains(&channel.peer_id) {
                continue;
            }
            if self.banned.contains(&channel.id) {
                continue;
            }
            if self.excluded.contains(&channel.id) {
                continue;
            }
            if matches!(self.capacity_ceiling_sat, Some(cap) if channel.capacity_sat > cap) {
                continue;
            }

            if let Some(mut path) = self.find(
                &channel.peer_id,
                to,
                amount_sat,
                used,
                reached.as_deref_mut(),
                depth - 1,
            )? {
                path.hops.push(channel.clone());
                used.remove(from);
                return Ok(Some(path));
            }
        }

        used.remove(from);
        Ok(None)
    }
}
