use crate::route::Route;

/// Assign per-hop expiry heights and the route's total time lock.
///
/// The running lock starts at `current_block + final_cltv_delta`, the expiry
/// the receiver requires at the destination-adjacent hop. Walking toward the
/// source, each hop is assigned the running value, which then grows by that
/// hop's own CLTV delta — except the source-adjacent hop, whose delta is the
/// source's own concern and is never consumed. The total time lock is the
/// expiry required at the hop leaving the source.
pub fn assign_expiries(route: &mut Route, current_block: u32, final_cltv_delta: u32) {
    let mut lock = current_block.saturating_add(final_cltv_delta);
    for (index, hop) in route.hops.iter_mut().enumerate().rev() {
        hop.expiry = lock;
        if index != 0 {
            lock = lock.saturating_add(hop.cltv_delta);
        }
    }
    route.total_time_lock = lock;
}
