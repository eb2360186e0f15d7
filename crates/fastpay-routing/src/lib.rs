//! Fastpay routing — payment-channel graph routing engine.
//!
//! This crate provides:
//! - [`GraphStore`] — the shared channel graph, rebuilt wholesale from
//!   snapshots and swapped atomically, plus the process-lifetime ban list.
//! - [`PathSearch`] — depth-bounded backtracking search honoring capacity,
//!   ban, and exclusion constraints.
//! - [`Router`] — the three-tier strategy (direct, swapped-direction,
//!   common-node bridge) plus manual route construction.
//! - [`Route`] and [`Hop`] — the forward, fee-annotated result.
//! - [`assign_expiries`] — per-hop CLTV expiry and total time-lock
//!   assignment.

pub mod builder;
pub mod error;
pub mod graph;
pub mod route;
pub mod router;
pub mod search;
pub mod timelock;

// Re-exports for convenience.
pub use builder::build_path;
pub use error::RoutingError;
pub use graph::{DirectedChannel, Graph, GraphNode, GraphStore};
pub use route::{Hop, Route};
pub use router::{Router, RouterConfig};
pub use search::{PathSearch, RawPath};
pub use timelock::assign_expiries;
