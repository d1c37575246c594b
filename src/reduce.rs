//! Max-reduce and barrier (C5): centralized at tile 0. Also the only
//! synchronization point between iterations — no tile starts iteration
//! `k+1` until the root has collected and fanned out iteration `k`'s max.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

/// One tile's handle into the reduction. `reduce` both contributes this
/// tile's local residual and blocks until the global maximum is available,
/// which doubles as the inter-iteration barrier.
pub(crate) enum ReduceHandle {
    Root { ups: Vec<Receiver<f64>>, downs: Vec<SyncSender<f64>> },
    Worker { up: SyncSender<f64>, down: Receiver<f64> },
}

impl ReduceHandle {
    pub fn reduce(&self, local: f64) -> f64 {
        match self {
            ReduceHandle::Root { ups, downs } => {
                let mut max = local;
                for up in ups {
                    if let Ok(v) = up.recv() {
                        max = max.max(v);
                    }
                }
                for down in downs {
                    let _ = down.send(max);
                }
                max
            }
            ReduceHandle::Worker { up, down } => {
                let _ = up.send(local);
                down.recv().unwrap_or(local)
            }
        }
    }
}

/// Build one [`ReduceHandle`] per tile (index 0 is always the root),
/// mirroring `maxDiffResToRoot`/`maxDiffResFromRoot` in
/// `original_source/multithread.go`.
pub(crate) fn build_reduce(tiles: usize) -> Vec<ReduceHandle> {
    if tiles <= 1 {
        return vec![ReduceHandle::Root { ups: Vec::new(), downs: Vec::new() }];
    }

    let mut ups = Vec::with_capacity(tiles - 1);
    let mut downs = Vec::with_capacity(tiles - 1);
    let mut workers = Vec::with_capacity(tiles - 1);

    for _ in 1..tiles {
        let (up_tx, up_rx) = sync_channel(1);
        let (down_tx, down_rx) = sync_channel(1);
        ups.push(up_rx);
        downs.push(down_tx);
        workers.push(ReduceHandle::Worker { up: up_tx, down: down_rx });
    }

    let mut handles = vec![ReduceHandle::Root { ups, downs }];
    handles.extend(workers);
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn single_tile_reduces_to_itself() {
        let handles = build_reduce(1);
        assert_eq!(handles[0].reduce(0.42), 0.42);
    }

    #[test]
    fn four_tiles_agree_on_the_max() {
        let handles = build_reduce(4);
        let locals = [0.1, 0.9, 0.3, 0.2];

        thread::scope(|s| {
            for (handle, &local) in handles.iter().zip(locals.iter()) {
                s.spawn(move || {
                    let global = handle.reduce(local);
                    assert!((global - 0.9).abs() < 1e-12);
                });
            }
        });
    }
}
