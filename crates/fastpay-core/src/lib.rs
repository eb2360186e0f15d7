//! Fastpay core — shared types for the payment-channel routing engine.
//!
//! This crate provides:
//! - [`NodeId`] and [`ChannelId`] — identifiers used throughout the graph.
//! - [`GraphSnapshot`] and friends — the wholesale graph description consumed
//!   by the routing layer on every refresh.
//! - Millisatoshi/satoshi conversion helpers with exact integer arithmetic.

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{
    msat_from_sat, sat_from_msat_floor, ChannelId, GraphSnapshot, NodeId, NodeRecord,
    ChannelRecord, RoutingPolicy,
};
