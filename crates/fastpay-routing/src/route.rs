use serde::{Deserialize, Serialize};

use fastpay_core::{msat_from_sat, ChannelId, NodeId};

use crate::error::RoutingError;
use crate::search::RawPath;

/// One forwarding step of a finished route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hop {
    pub channel_id: ChannelId,
    /// The node this hop delivers to.
    pub peer_id: NodeId,
    /// Amount entering this hop, in millisatoshi. Includes the fees of every
    /// hop between here and the destination.
    pub amount_msat: u64,
    pub capacity_sat: u64,
    /// Fee charged for this hop's forwarding, in millisatoshi. Zero on the
    /// source-adjacent hop.
    pub fee_msat: u64,
    pub cltv_delta: u32,
    /// Absolute block height this hop's lock expires at. Zero until the
    /// route is annotated.
    pub expiry: u32,
}

/// A finished route, hops in source-to-destination order.
///
/// Produced once by conversion and time-lock annotation, then handed to the
/// payment dispatcher unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// The node the route leaves from, when known.
    pub source: Option<NodeId>,
    pub hops: Vec<Hop>,
    /// Amount leaving the source, in millisatoshi.
    pub total_amount_msat: u64,
    /// `total_amount_msat` minus the amount arriving at the destination.
    pub total_fees_msat: u64,
    /// Expiry required at the hop leaving the source. Zero until annotated.
    pub total_time_lock: u32,
}

impl Route {
    /// Convert a raw back-to-front path into a forward, fee-annotated route.
    ///
    /// The destination-adjacent hop forwards exactly the requested amount;
    /// walking source-ward, each hop's amount grows by the fee of the hop
    /// just visited, so the source-adjacent hop carries every downstream fee
    /// baked into its amount and charges no fee of its own. Each hop's fee
    /// is its own channel policy applied to the amount it forwards.
    pub fn from_raw(raw: &RawPath) -> Result<Self, RoutingError> {
        let destination_msat = msat_from_sat(raw.amount_sat)?;
        let overflow = || RoutingError::AmountOverflow {
            amount_sat: raw.amount_sat,
        };

        let mut hops = Vec::with_capacity(raw.hops.len());
        let mut running_msat = destination_msat;

        // Raw hops come destination-adjacent first.
        for (index, channel) in raw.hops.iter().enumerate() {
            let source_adjacent = index + 1 == raw.hops.len();
            let fee_msat = if source_adjacent {
                0
            } else {
                channel.fee_msat(running_msat)
            };
            hops.push(Hop {
                channel_id: channel.id.clone(),
                peer_id: channel.peer_id.clone(),
                amount_msat: running_msat,
                capacity_sat: channel.capacity_sat,
                fee_msat,
                cltv_delta: channel.cltv_delta,
                expiry: 0,
            });
            running_msat = running_msat.checked_add(fee_msat).ok_or_else(overflow)?;
        }
        hops.reverse();

        Ok(Self {
            source: raw.origin.clone(),
            hops,
            total_amount_msat: running_msat,
            total_fees_msat: running_msat - destination_msat,
            total_time_lock: 0,
        })
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }
}
