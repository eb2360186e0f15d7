use fastpay_core::{ChannelId, NodeId};

use crate::error::RoutingError;
use crate::graph::Graph;
use crate::search::RawPath;

/// Construct a raw path from an explicit channel-id sequence, bypassing
/// search. Used for operator-directed or already-negotiated routes.
///
/// Every id must resolve against the current graph: an unknown node or a
/// channel id missing from the current node's outgoing list is a fatal
/// error naming the offending identifier, never a soft miss.
///
/// The caller supplies channels in forward order; the hops are normalized
/// into the back-to-front convention here so the result goes through the
/// same fee/amount conversion as a searched path.
pub fn build_path(
    graph: &Graph,
    first_node: &NodeId,
    channel_ids: &[ChannelId],
    amount_sat: u64,
) -> Result<RawPath, RoutingError> {
    let mut node = graph.node(first_node).ok_or_else(|| RoutingError::UnknownNode {
        id: first_node.clone(),
    })?;

    let mut hops = Vec::with_capacity(channel_ids.len());
    for channel_id in channel_ids {
        let channel = node
            .channels
            .iter()
            .find(|c| &c.id == channel_id)
            .ok_or_else(|| RoutingError::UnknownChannel {
                channel: channel_id.clone(),
                node: node.id.clone(),
            })?;
        hops.push(channel.clone());
        node = graph
            .node(&channel.peer_id)
            .ok_or_else(|| RoutingError::UnknownNode {
                id: channel.peer_id.clone(),
            })?;
    }
    hops.reverse();

    Ok(RawPath {
        amount_sat,
        origin: Some(first_node.clone()),
        hops,
    })
}
