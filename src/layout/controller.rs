//! Registry of supported controllers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::LatticeVector;
use crate::layout::vectors::{rectangular_vectors, row_based_vectors, HexRows, HEX_ROW_ANCHORS};

/// A supported controller topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Exquis, 39-pad layout (small hex grid).
    Exquis39,
    /// Exquis, full 61-pad hex grid.
    Exquis,
    /// 8×8 pad grid.
    Launchpad,
    /// LinnStrument 128: 16 columns × 8 rows.
    Linnstrument128,
}

impl Controller {
    pub const ALL: [Controller; 4] = [
        Controller::Exquis39,
        Controller::Exquis,
        Controller::Launchpad,
        Controller::Linnstrument128,
    ];

    /// Stable identifier, used as the cache key and in file names.
    pub fn key(self) -> &'static str {
        match self {
            Controller::Exquis39 => "exquis39",
            Controller::Exquis => "exquis",
            Controller::Launchpad => "launchpad",
            Controller::Linnstrument128 => "linnstrument128",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Controller::Exquis39 => "Exquis 39-key",
            Controller::Exquis => "Exquis 61-key",
            Controller::Launchpad => "Launchpad 8x8",
            Controller::Linnstrument128 => "LinnStrument 128",
        }
    }

    /// Labels of the first and second basis directions.
    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Controller::Exquis39 | Controller::Exquis => ("Up-left step", "Up-right step"),
            Controller::Launchpad | Controller::Linnstrument128 => ("Up step", "Right step"),
        }
    }

    /// Exquis hex layouts, as opposed to rectangular pad grids.
    pub fn is_hex(self) -> bool {
        matches!(self, Controller::Exquis39 | Controller::Exquis)
    }

    /// Offsets from the reference pad to every pad of the controller.
    pub fn vectors(self) -> Vec<LatticeVector> {
        match self {
            Controller::Exquis39 => row_based_vectors(
                &HEX_ROW_ANCHORS,
                HexRows { start: (0, 0), even_len: 3, odd_len: 4 },
            ),
            Controller::Exquis => row_based_vectors(
                &HEX_ROW_ANCHORS,
                HexRows { start: (1, -1), even_len: 5, odd_len: 6 },
            ),
            Controller::Launchpad => rectangular_vectors(8, 8),
            Controller::Linnstrument128 => rectangular_vectors(16, 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pad_counts() {
        assert_eq!(Controller::Exquis39.vectors().len(), 39);
        assert_eq!(Controller::Exquis.vectors().len(), 61);
        assert_eq!(Controller::Launchpad.vectors().len(), 64);
        assert_eq!(Controller::Linnstrument128.vectors().len(), 128);
    }

    #[test]
    fn pads_are_distinct_and_include_reference() {
        for c in Controller::ALL {
            let v = c.vectors();
            let unique: HashSet<_> = v.iter().collect();
            assert_eq!(unique.len(), v.len(), "{}", c.key());
            assert!(v.contains(&LatticeVector::new(0, 0)), "{}", c.key());
        }
    }

    fn pads(v: &[(i32, i32)]) -> Vec<LatticeVector> {
        v.iter().map(|&(dy, dx)| LatticeVector::new(dy, dx)).collect()
    }

    #[test]
    fn small_hex_pad_order() {
        let expected = pads(&[
            (4, 1), (3, 2), (2, 3), (1, 4),
            (3, 1), (2, 2), (1, 3),
            (3, 0), (2, 1), (1, 2), (0, 3),
            (2, 0), (1, 1), (0, 2),
            (2, -1), (1, 0), (0, 1), (-1, 2),
            (1, -1), (0, 0), (-1, 1),
            (1, -2), (0, -1), (-1, 0), (-2, 1),
            (0, -2), (-1, -1), (-2, 0),
            (0, -3), (-1, -2), (-2, -1), (-3, 0),
            (-1, -3), (-2, -2), (-3, -1),
            (-1, -4), (-2, -3), (-3, -2), (-4, -1),
        ]);
        assert_eq!(Controller::Exquis39.vectors(), expected);
    }

    #[test]
    fn full_hex_first_and_last_rows() {
        let v = Controller::Exquis.vectors();
        assert_eq!(v[..6], pads(&[(5, 0), (4, 1), (3, 2), (2, 3), (1, 4), (0, 5)])[..]);
        assert_eq!(v[6..11], pads(&[(4, 0), (3, 1), (2, 2), (1, 3), (0, 4)])[..]);
        assert_eq!(
            v[55..],
            pads(&[(0, -5), (-1, -4), (-2, -3), (-3, -2), (-4, -1), (-5, 0)])[..]
        );
    }

    #[test]
    fn full_hex_contains_small_hex() {
        let full: HashSet<_> = Controller::Exquis.vectors().into_iter().collect();
        assert!(Controller::Exquis39.vectors().iter().all(|v| full.contains(v)));
    }

    #[test]
    fn keys_match_clap_names() {
        for c in Controller::ALL {
            let parsed = Controller::from_str(c.key(), false).unwrap();
            assert_eq!(parsed, c);
        }
        assert!(Controller::from_str("bogus", false).is_err());
    }
}
