use fastpay_core::{ChannelId, CoreError, NodeId};

/// Errors that can occur within the routing layer.
///
/// "No route under the current constraints" is not represented here: the
/// search operations return `Ok(None)` for that case so callers can branch
/// on it without treating it as a failure.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("node {id} not found in channel graph")]
    UnknownNode { id: NodeId },

    #[error("channel {channel} not found on node {node}")]
    UnknownChannel { channel: ChannelId, node: NodeId },

    #[error("bridge node {node} was reached by both half-searches but a full-budget re-search failed")]
    BridgeInconsistency { node: NodeId },

    #[error("fee accumulation overflowed for amount {amount_sat} sat")]
    AmountOverflow { amount_sat: u64 },

    #[error("{feature} is not implemented")]
    NotImplemented { feature: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}
