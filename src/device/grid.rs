//! Flat work-group dispatch over a bounded worker pool.
//!
//! A launch is a fixed number of equal work groups. Workers claim group
//! indices from a shared counter, so groups start in strictly increasing
//! index order no matter how the pool schedules the workers. That claim
//! order is the only cross-group ordering the kernels rely on: a group
//! publishes its partial result before its first blocking operation, so a
//! lookback across lower-indexed groups always finds at least a partial and
//! the dispatch makes progress with any worker count.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Launch `groups` work groups on up to `workers` threads.
///
/// `make_state` builds one scratch state per worker (the group-local
/// memory); `body` runs one group. Group indices are handed out in
/// monotonically increasing order.
pub(crate) fn dispatch_groups<S, M, F>(groups: usize, workers: usize, make_state: M, body: F)
where
    M: Fn() -> S + Sync,
    F: Fn(&mut S, usize) + Sync,
{
    if groups == 0 {
        return;
    }

    let next_group = AtomicUsize::new(0);
    let workers = workers.clamp(1, groups);

    (0..workers).into_par_iter().for_each(|_| {
        let mut state = make_state();
        loop {
            let group = next_group.fetch_add(1, Ordering::Relaxed);
            if group >= groups {
                break;
            }
            body(&mut state, group);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn runs_every_group_exactly_once() {
        let hits: Vec<AtomicU32> = (0..100).map(|_| AtomicU32::new(0)).collect();
        dispatch_groups(100, 4, || (), |_, g| {
            hits[g].fetch_add(1, Ordering::Relaxed);
        });
        for hit in &hits {
            assert_eq!(hit.load(Ordering::Relaxed), 1);
        }
    }

    #[test]
    fn zero_groups_is_a_no_op() {
        dispatch_groups(0, 4, || (), |_, _| panic!("no group to run"));
    }

    #[test]
    fn single_worker_claims_in_order() {
        let seen = std::sync::Mutex::new(Vec::new());
        dispatch_groups(10, 1, || (), |_, g| seen.lock().unwrap().push(g));
        assert_eq!(*seen.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }
}
