use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use fastpay_core::{ChannelId, NodeId};

use crate::builder::build_path;
use crate::error::RoutingError;
use crate::graph::{Graph, GraphStore};
use crate::route::Route;
use crate::search::{PathSearch, RawPath};

/// Tunables for route finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Depth budget per search attempt, in hops. A tunable constant, not a
    /// protocol limit; bridged routes may span up to twice this.
    pub max_search_depth: u32,
    /// Channels above this capacity (satoshi) are skipped entirely.
    /// Temporary operational guard against committing large channels to
    /// experimental payments; `None` disables it.
    pub capacity_ceiling_sat: Option<u64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_search_depth: 4,
            capacity_ceiling_sat: Some(10_000_000),
        }
    }
}

/// Route finding over a shared [`GraphStore`].
///
/// Three strategies are tried in order: a direct search, a swapped-direction
/// search used as an existence check, and a common-node bridge composed from
/// two half-searches. "No route" is `Ok(None)`; errors are reserved for
/// graph/caller inconsistencies.
pub struct Router {
    store: Arc<GraphStore>,
    config: RouterConfig,
}

impl Router {
    pub fn new(store: Arc<GraphStore>, config: RouterConfig) -> Self {
        Self { store, config }
    }

    pub fn with_defaults(store: Arc<GraphStore>) -> Self {
        Self::new(store, RouterConfig::default())
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Find a route able to deliver `amount_sat` from `from` to `to`,
    /// avoiding banned channels and the per-call `excluded` set.
    pub fn find_route(
        &self,
        from: &NodeId,
        to: &NodeId,
        amount_sat: u64,
        excluded: &HashSet<ChannelId>,
    ) -> Result<Option<Route>, RoutingError> {
        let graph = self.store.current();
        let search = PathSearch::new(
            &graph,
            self.store.banned_set(),
            excluded,
            self.config.capacity_ceiling_sat,
        );
        let depth = self.config.max_search_depth;

        tracing::debug!(
            %from,
            %to,
            amount_sat,
            excluded = excluded.len(),
            "searching for route"
        );

        let mut reached_from_source = HashSet::new();
        if let Some(mut path) = search.find(
            from,
            to,
            amount_sat,
            &mut HashSet::new(),
            Some(&mut reached_from_source),
            depth,
        )? {
            path.origin = Some(from.clone());
            let route = Route::from_raw(&path)?;
            tracing::info!(
                hops = route.hop_count(),
                total_fees_msat = route.total_fees_msat,
                "route found"
            );
            return Ok(Some(route));
        }

        let mut reached_from_target = HashSet::new();
        if let Some(reversed) = search.find(
            to,
            from,
            amount_sat,
            &mut HashSet::new(),
            Some(&mut reached_from_target),
            depth,
        )? {
            // The swapped-direction hit only proves the corridor exists; its
            // hops carry the wrong direction's policies. Replay the channel
            // sequence forward so each hop picks up its own direction.
            let route = self.forward_from_reversed(&graph, from, &reversed, amount_sat)?;
            tracing::info!(
                hops = route.hop_count(),
                total_fees_msat = route.total_fees_msat,
                "route found via swapped-direction search"
            );
            return Ok(Some(route));
        }

        // Neither end reaches the other directly; look for a node both
        // half-searches entered and compose a route through it. Any common
        // node will do; no cheapest-candidate selection.
        for node in reached_from_source.intersection(&reached_from_target) {
            let inconsistent = || RoutingError::BridgeInconsistency { node: node.clone() };
            let first = search
                .find(from, node, amount_sat, &mut HashSet::new(), None, depth)?
                .ok_or_else(inconsistent)?;
            let second = search
                .find(node, to, amount_sat, &mut HashSet::new(), None, depth)?
                .ok_or_else(inconsistent)?;

            let path = RawPath::bridge(from.clone(), first, second);
            let route = Route::from_raw(&path)?;
            tracing::info!(
                bridge = %node,
                hops = route.hop_count(),
                total_fees_msat = route.total_fees_msat,
                "route found via bridge node"
            );
            return Ok(Some(route));
        }

        tracing::debug!(%from, %to, amount_sat, "no route under current constraints");
        Ok(None)
    }

    /// Rebuild a forward route out of a path discovered in the swapped
    /// direction. The reversed path's hops run nearest-`from` first, so its
    /// channel ids in stored order are the forward traversal order.
    fn forward_from_reversed(
        &self,
        graph: &Graph,
        from: &NodeId,
        reversed: &RawPath,
        amount_sat: u64,
    ) -> Result<Route, RoutingError> {
        let channel_ids: Vec<ChannelId> = reversed.hops.iter().map(|c| c.id.clone()).collect();
        let path = build_path(graph, from, &channel_ids, amount_sat)?;
        Route::from_raw(&path)
    }

    /// Construct a route from an explicit channel-id sequence against the
    /// current graph, bypassing search. Fatal if any id does not resolve.
    pub fn build_route(
        &self,
        first_node: &NodeId,
        channel_ids: &[ChannelId],
        amount_sat: u64,
    ) -> Result<Route, RoutingError> {
        let graph = self.store.current();
        let path = build_path(&graph, first_node, channel_ids, amount_sat)?;
        Route::from_raw(&path)
    }

    /// Search for the path maximizing the bottleneck capacity.
    ///
    /// Not yet implemented; the error is distinct from the not-found case so
    /// callers cannot mistake the gap for "no path".
    pub fn find_most_capacious(
        &self,
        _from: &NodeId,
        _to: &NodeId,
    ) -> Result<Option<Route>, RoutingError> {
        Err(RoutingError::NotImplemented {
            feature: "most capacious path search",
        })
    }
}
