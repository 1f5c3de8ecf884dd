//! Lattice vector generators.
//!
//! - row-based hex layouts, built row by row from anchor positions
//! - dense rectangular grids centered on the reference pad
//! - the full Exquis grid in scale order, for `.scl` export

use crate::domain::LatticeVector;

/// Anchor positions `(g1, g2)` of the eleven rows of an Exquis-style hex grid.
pub const HEX_ROW_ANCHORS: [(i32, i32); 11] = [
    (4, 1),
    (3, 1),
    (3, 0),
    (2, 0),
    (2, -1),
    (1, -1),
    (1, -2),
    (0, -2),
    (0, -3),
    (-1, -3),
    (-1, -4),
];

/// Shape of one row-based layout.
///
/// A row anchored at `(g1, g2)` starts at `(g1 + start.0, g2 + start.1)` and
/// advances by `(-1, +1)` per pad. Its length is `even_len` when `g1 + g2` is
/// even and `odd_len` otherwise, which produces the zig-zag of a hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRows {
    pub start: (i32, i32),
    pub even_len: usize,
    pub odd_len: usize,
}

impl HexRows {
    fn row(&self, g1: i32, g2: i32) -> impl Iterator<Item = LatticeVector> + '_ {
        let len = if (g1 + g2).rem_euclid(2) == 0 {
            self.even_len
        } else {
            self.odd_len
        };
        let (y0, x0) = (g1 + self.start.0, g2 + self.start.1);
        (0..len as i32).map(move |i| LatticeVector::new(y0 - i, x0 + i))
    }
}

/// Concatenate the rows of `shape` anchored at `anchors`, in anchor order.
pub fn row_based_vectors(anchors: &[(i32, i32)], shape: HexRows) -> Vec<LatticeVector> {
    anchors
        .iter()
        .flat_map(|&(g1, g2)| shape.row(g1, g2).collect::<Vec<_>>())
        .collect()
}

/// The 61 Exquis pads in scale order, as `(up-right, right)` step counts.
///
/// Rows run bottom to top and pads left to right within a row; the
/// bottom-left pad is the unison. Rows alternate between 6 and 5 pads.
pub fn exquis_scale_vectors() -> Vec<LatticeVector> {
    let mut out = Vec::with_capacity(61);
    for row in 0..11 {
        let len = if row % 2 == 0 { 6 } else { 5 };
        let first = -(row / 2);
        out.extend((0..len).map(|k| LatticeVector::new(row, first + k)));
    }
    out
}

/// Every pad of a `width × height` grid, centered: `(y - h/2, x - w/2)`.
pub fn rectangular_vectors(width: usize, height: usize) -> Vec<LatticeVector> {
    let (cx, cy) = ((width / 2) as i32, (height / 2) as i32);
    let mut out = Vec::with_capacity(width * height);
    for x in 0..width as i32 {
        for y in 0..height as i32 {
            out.push(LatticeVector::new(y - cy, x - cx));
        }
    }
    out
}
