use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Identifier of a node in the channel graph (a pubkey string on Lightning).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a channel. Both directions of the same physical channel
/// share one id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a new channel id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a satoshi amount to millisatoshi, failing on overflow.
pub fn msat_from_sat(sat: u64) -> Result<u64, CoreError> {
    sat.checked_mul(1_000).ok_or(CoreError::AmountOverflow(sat))
}

/// Convert a millisatoshi amount to whole satoshi, rounding down.
pub fn sat_from_msat_floor(msat: u64) -> u64 {
    msat / 1_000
}

/// One direction's forwarding policy for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Flat fee per forwarded payment, in millisatoshi.
    pub fee_base_msat: u64,
    /// Proportional fee in parts-per-million of the forwarded amount.
    pub fee_rate_milli_msat: u64,
    /// Additional block-height lock this hop requires beyond downstream.
    pub time_lock_delta: u32,
}

/// A node as listed in a graph snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub alias: String,
}

/// An undirected channel descriptor as listed in a graph snapshot.
///
/// Capacity is shared by both directions; fee and time-lock policy is
/// independent per direction and must never be assumed symmetric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: ChannelId,
    pub node1_id: NodeId,
    pub node2_id: NodeId,
    /// Channel capacity in satoshi.
    pub capacity_sat: u64,
    pub node1_policy: RoutingPolicy,
    pub node2_policy: RoutingPolicy,
}

/// A wholesale description of the channel graph, fetched from an external
/// collaborator (e.g., an lnd `DescribeGraph` call) and consumed by the
/// routing layer's update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub channels: Vec<ChannelRecord>,
}
