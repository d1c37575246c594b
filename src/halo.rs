//! Halo transport (C4): bounded point-to-point channels between adjacent
//! tiles, built once by the dispatcher before any worker starts.
//!
//! Each pair of adjacent tiles shares one channel per direction. A tile's
//! whole edge (its `size` border values) travels as a single `Vec<f64>`
//! message down a `sync_channel(1)` — the idiomatic-Rust analogue of the
//! original's buffered `chan float64` carrying `size` individual floats;
//! batching the edge into one message preserves FIFO, one-edge-per-iteration
//! ordering without `size` separate channel ops.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

pub(crate) struct Neighbor {
    pub to: SyncSender<Vec<f64>>,
    pub from: Receiver<Vec<f64>>,
}

/// A tile's four (nullable) neighbor links. `None` on a side that coincides
/// with the global Dirichlet boundary.
#[derive(Default)]
pub(crate) struct Links {
    pub top: Option<Neighbor>,
    pub bottom: Option<Neighbor>,
    pub left: Option<Neighbor>,
    pub right: Option<Neighbor>,
}

/// Build the `Links` table for every tile in a `tiles_per_side x tiles_per_side`
/// grid. For tile `(r, c)`, the `bottom` channel of `(r, c)` is aliased to the
/// `top` channel of `(r+1, c)` (and similarly for right/left) — built in one
/// pass, matching `newAdjacents` in `original_source/multithread.go`.
pub(crate) fn build_links(tiles_per_side: usize, edge_len: usize) -> Vec<Links> {
    let n = tiles_per_side * tiles_per_side;
    let mut links: Vec<Links> = (0..n).map(|_| Links::default()).collect();

    // Vertical (top/bottom) pairs.
    for r in 0..tiles_per_side.saturating_sub(1) {
        for c in 0..tiles_per_side {
            let top_id = r * tiles_per_side + c;
            let bottom_id = (r + 1) * tiles_per_side + c;

            let (to_bottom, from_top) = sync_channel(1); // top_id -> bottom_id
            let (to_top, from_bottom) = sync_channel(1); // bottom_id -> top_id

            links[top_id].bottom = Some(Neighbor { to: to_bottom, from: from_bottom });
            links[bottom_id].top = Some(Neighbor { to: to_top, from: from_top });
        }
    }

    // Horizontal (left/right) pairs.
    for r in 0..tiles_per_side {
        for c in 0..tiles_per_side.saturating_sub(1) {
            let left_id = r * tiles_per_side + c;
            let right_id = r * tiles_per_side + c + 1;

            let (to_right, from_left) = sync_channel(1); // left_id -> right_id
            let (to_left, from_right) = sync_channel(1); // right_id -> left_id

            links[left_id].right = Some(Neighbor { to: to_right, from: from_right });
            links[right_id].left = Some(Neighbor { to: to_left, from: from_left });
        }
    }

    let _ = edge_len; // capacity is fixed at 1 edge regardless of edge length; kept for callers' symmetry with tile sizing.
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tile_has_no_links() {
        let links = build_links(1, 4);
        assert!(links[0].top.is_none());
        assert!(links[0].bottom.is_none());
        assert!(links[0].left.is_none());
        assert!(links[0].right.is_none());
    }

    #[test]
    fn two_by_two_grid_wires_every_neighbor() {
        let links = build_links(2, 4);
        // tile 0 = (0,0): neighbors bottom=(1,0)=id2, right=(0,1)=id1
        assert!(links[0].top.is_none());
        assert!(links[0].left.is_none());
        assert!(links[0].bottom.is_some());
        assert!(links[0].right.is_some());
        // tile 3 = (1,1): neighbors top=(0,1)=id1, left=(1,0)=id2
        assert!(links[3].top.is_some());
        assert!(links[3].left.is_some());
        assert!(links[3].bottom.is_none());
        assert!(links[3].right.is_none());
    }

    #[test]
    fn edge_sent_is_received_in_order() {
        let links = build_links(2, 3);
        let top_left = &links[0];
        top_left.right.as_ref().unwrap().to.send(vec![1.0, 2.0, 3.0]).unwrap();
        let received = links[1].left.as_ref().unwrap().from.recv().unwrap();
        assert_eq!(received, vec![1.0, 2.0, 3.0]);
    }
}
