//! Naming of last-layer-corner cases.
//!
//! Input states are expected in canonical orientation (see
//! [`crate::normalize`]) and may only disturb the four upper corners, the
//! upper-layer edge permutation, and the DRF corner. The name is invariant
//! under turns of the upper face: the placed-corner branch searches the
//! four cyclic rotations of its twist pattern, and the top-layer branch
//! turns the reference corner back to UFR before encoding.

use std::fmt::Display;

use puzzle_kinematics::{CubeDef, CubeState, Face};
use thiserror::Error;

pub(crate) const EDGE_NAMES: [&str; 12] = [
    "UF", "UR", "UB", "UL", "DF", "DR", "DB", "DL", "FR", "FL", "BR", "BL",
];
pub(crate) const CORNER_NAMES: [&str; 8] =
    ["UFR", "URB", "UBL", "ULF", "DRF", "DFL", "DLB", "DBR"];
pub(crate) const CENTER_NAMES: [&str; 6] = ["U", "L", "F", "R", "B", "D"];

/// The piece identity of the DRF corner, the distinguished reference piece.
const DRF: u8 = 4;

/// Rereads a twist through the frame of a twisted reference corner: 1 and 2
/// swap, 0 is fixed.
const TWIST_COMPLEMENT: [u8; 3] = [0, 2, 1];

/// A piece that breaks the "only last-layer corners disturbed" invariant.
/// Advisory: callers are expected to skip such states, not crash.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{0} center is misplaced")]
    MisplacedCenter(&'static str),
    #[error("{0} edge is misplaced")]
    MisplacedEdge(&'static str),
    #[error("{0} edge is misoriented")]
    MisorientedEdge(&'static str),
    #[error("{0} corner is misplaced")]
    MisplacedCorner(&'static str),
    #[error("{0} corner is misoriented")]
    MisorientedCorner(&'static str),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("not a pure last-layer-corner state: {0}")]
    InvalidState(#[from] InvariantViolation),
    #[error("no enumerated case matches twist pattern {pattern:?} under any turn of the upper face")]
    Unclassifiable { pattern: [u8; 4] },
}

/// Family of the enumerated cases with the reference corner already home;
/// the three families are the three twist classes of the home corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlacedFamily {
    I,
    Im,
    C,
}

impl Display for PlacedFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacedFamily::I => write!(f, "I"),
            PlacedFamily::Im => write!(f, "Im"),
            PlacedFamily::C => write!(f, "C"),
        }
    }
}

/// Twist of the reference corner when it sits in the top layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrfTwist {
    Oriented,
    Clockwise,
    Anticlockwise,
}

impl Display for DrfTwist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrfTwist::Oriented => write!(f, "O"),
            DrfTwist::Clockwise => write!(f, "+"),
            DrfTwist::Anticlockwise => write!(f, "-"),
        }
    }
}

/// A canonical case identifier. Displays as the conventional short name,
/// "C0" through "-26".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseName {
    /// Reference corner in its home slot; one of 24 enumerated patterns.
    Placed { family: PlacedFamily, index: u8 },
    /// Reference corner in the top layer; indexed by the remaining three
    /// corners' twist shape in base 3.
    TopLayer { twist: DrfTwist, shape: u8 },
}

impl Display for CaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseName::Placed { family, index } => write!(f, "{family}{index}"),
            CaseName::TopLayer { twist, shape } => write!(f, "{twist}{shape}"),
        }
    }
}

/// Check that only the last-layer corners are disturbed: all centers home,
/// every edge below the top layer home and no edge flipped anywhere, and
/// the three bottom-tier corners behind the working slot untouched.
///
/// # Errors
///
/// Names the first offending piece.
pub fn check_last_layer_only(state: &CubeState) -> Result<(), InvariantViolation> {
    for (slot, &name) in CENTER_NAMES.iter().enumerate() {
        if state.centers.permutation[slot] as usize != slot {
            return Err(InvariantViolation::MisplacedCenter(name));
        }
    }
    for (slot, &name) in EDGE_NAMES.iter().enumerate() {
        if slot >= 4 && state.edges.permutation[slot] as usize != slot {
            return Err(InvariantViolation::MisplacedEdge(name));
        }
        if state.edges.orientation[slot] != 0 {
            return Err(InvariantViolation::MisorientedEdge(name));
        }
    }
    for (slot, &name) in CORNER_NAMES.iter().enumerate().skip(5) {
        if state.corners.permutation[slot] as usize != slot {
            return Err(InvariantViolation::MisplacedCorner(name));
        }
        if state.corners.orientation[slot] != 0 {
            return Err(InvariantViolation::MisorientedCorner(name));
        }
    }
    Ok(())
}

/// Name the case of a state in canonical orientation.
///
/// # Errors
///
/// [`ClassifyError::InvalidState`] if the state disturbs more than the
/// last-layer corners. [`ClassifyError::Unclassifiable`] if the placed
/// branch exhausts its four-way search, which indicates an unreachable
/// input rather than a gap: the enumerated patterns tile every reachable
/// pattern under rotation.
///
/// # Panics
///
/// Panics if `def` carries no U move.
pub fn classify(def: &CubeDef, state: &CubeState) -> Result<CaseName, ClassifyError> {
    check_last_layer_only(state)?;
    let drf_slot = state
        .corners
        .permutation
        .iter()
        .position(|&piece| piece == DRF)
        .expect("corner permutation is a bijection");

    if drf_slot == DRF as usize {
        let ori = &state.corners.orientation;
        let pattern = [ori[0], ori[1], ori[2], ori[3]];
        let mut rotated = pattern;
        for _ in 0..4 {
            if let Some(name) = placed_case(rotated) {
                return Ok(name);
            }
            rotated.rotate_left(1);
        }
        Err(ClassifyError::Unclassifiable { pattern })
    } else {
        // Signed minimal turn: slot 3 is one quarter turn the other way.
        // The enumerated tables were built against the signed convention,
        // so it stays.
        let auf = if drf_slot == 3 { -1 } else { drf_slot as i32 };
        let adjusted = def
            .apply_axis_turn(state, Face::U, auf)
            .expect("definition carries the U move");
        let ori = &adjusted.corners.orientation;
        let (twist, shape) = match ori[0] {
            0 => (DrfTwist::Oriented, ori[1] + 3 * ori[2] + 9 * ori[3]),
            1 => (
                DrfTwist::Clockwise,
                // The twisted reference frame also mirrors the reading
                // order of the remaining three corners.
                9 * TWIST_COMPLEMENT[ori[1] as usize]
                    + 3 * TWIST_COMPLEMENT[ori[2] as usize]
                    + TWIST_COMPLEMENT[ori[3] as usize],
            ),
            2 => (DrfTwist::Anticlockwise, ori[1] + 3 * ori[2] + 9 * ori[3]),
            _ => unreachable!("corner twist is always below 3"),
        };
        Ok(CaseName::TopLayer { twist, shape })
    }
}

/// The 24 enumerated twist patterns for a placed reference corner, read
/// from the top corner slots UFR URB UBL ULF in order. The patterns tile
/// all 81 four-digit patterns exactly once under cyclic rotation, which is
/// why the four-way search in [`classify`] cannot miss.
fn placed_case(pattern: [u8; 4]) -> Option<CaseName> {
    use PlacedFamily::{C, I, Im};
    let (family, index) = match pattern {
        [2, 0, 0, 0] => (I, 0),
        [0, 0, 2, 2] => (I, 1),
        [0, 2, 0, 2] => (I, 2),
        [2, 0, 2, 1] => (I, 3),
        [0, 1, 2, 2] => (I, 4),
        [0, 2, 2, 1] => (I, 5),
        [2, 1, 1, 1] => (I, 6),
        [2, 2, 2, 2] => (I, 7),
        [1, 0, 0, 0] => (Im, 0),
        [0, 1, 1, 0] => (Im, 1),
        [0, 1, 0, 1] => (Im, 2),
        [1, 2, 1, 0] => (Im, 3),
        [0, 1, 1, 2] => (Im, 4),
        [0, 2, 1, 1] => (Im, 5),
        [1, 2, 2, 2] => (Im, 6),
        [1, 1, 1, 1] => (Im, 7),
        [0, 0, 0, 0] => (C, 0),
        [2, 2, 2, 0] => (C, 1),
        [1, 0, 1, 1] => (C, 2),
        [2, 1, 2, 1] => (C, 3),
        [1, 0, 2, 0] => (C, 4),
        [0, 2, 1, 0] => (C, 5),
        [0, 1, 2, 0] => (C, 6),
        [2, 2, 1, 1] => (C, 7),
        _ => return None,
    };
    Some(CaseName::Placed { family, index })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use puzzle_kinematics::CUBE3;

    use super::*;

    fn top_layer_state(cp: [u8; 8], co: [u8; 8]) -> CubeState {
        let mut state = CubeState::solved();
        state.corners.permutation = cp;
        state.corners.orientation = co;
        state
    }

    #[test]
    fn test_solved_is_c0() {
        let name = classify(&CUBE3, &CubeState::solved()).unwrap();
        assert_eq!(name.to_string(), "C0");
    }

    #[test]
    fn test_single_twist_is_im0_without_rotation() {
        let mut state = CubeState::solved();
        state.corners.orientation[0] = 1;
        let name = classify(&CUBE3, &state).unwrap();
        assert_eq!(
            name,
            CaseName::Placed {
                family: PlacedFamily::Im,
                index: 0
            }
        );
    }

    #[test]
    fn test_rotated_pattern_reaches_the_same_entry() {
        // "0222" is "2220" after one cyclic rotation
        let mut state = CubeState::solved();
        state.corners.orientation = [0, 2, 2, 2, 0, 0, 0, 0];
        let name = classify(&CUBE3, &state).unwrap();
        assert_eq!(name.to_string(), "C1");
    }

    #[test]
    fn test_placed_patterns_tile_all_81() {
        let mut names = HashSet::new();
        for packed in 0..81_u8 {
            let pattern = [
                packed % 3,
                (packed / 3) % 3,
                (packed / 9) % 3,
                (packed / 27) % 3,
            ];
            let mut matched = HashSet::new();
            let mut rotated = pattern;
            for _ in 0..4 {
                if let Some(name) = placed_case(rotated) {
                    matched.insert(name);
                }
                rotated.rotate_left(1);
            }
            assert_eq!(matched.len(), 1, "pattern {pattern:?}");
            names.extend(matched);
        }
        assert_eq!(names.len(), 24);
    }

    #[test]
    fn test_top_layer_oriented() {
        let state = top_layer_state([4, 2, 1, 3, 0, 5, 6, 7], [0, 1, 2, 0, 0, 0, 0, 0]);
        let name = classify(&CUBE3, &state).unwrap();
        assert_eq!(
            name,
            CaseName::TopLayer {
                twist: DrfTwist::Oriented,
                shape: 7
            }
        );
        assert_eq!(name.to_string(), "O7");
    }

    #[test]
    fn test_top_layer_is_auf_invariant() {
        let state = top_layer_state([4, 2, 1, 3, 0, 5, 6, 7], [0, 1, 2, 0, 0, 0, 0, 0]);
        let expected = classify(&CUBE3, &state).unwrap();
        for turns in [1, 2, 3] {
            let shifted = CUBE3
                .apply_axis_turn(&state, Face::U, turns)
                .unwrap();
            assert_eq!(classify(&CUBE3, &shifted).unwrap(), expected, "{turns}");
        }
    }

    #[test]
    fn test_top_layer_clockwise_reads_mirrored() {
        let state = top_layer_state([4, 2, 1, 3, 0, 5, 6, 7], [1, 1, 2, 0, 0, 0, 0, 0]);
        let name = classify(&CUBE3, &state).unwrap();
        assert_eq!(name.to_string(), "+21");
    }

    #[test]
    fn test_top_layer_anticlockwise() {
        let state = top_layer_state([4, 2, 1, 3, 0, 5, 6, 7], [2, 1, 0, 2, 0, 0, 0, 0]);
        let name = classify(&CUBE3, &state).unwrap();
        assert_eq!(name.to_string(), "-19");
    }

    #[test]
    fn test_top_layer_shape_stays_in_base3_range() {
        for twist in 0..3_u8 {
            for packed in 0..27_u8 {
                let co = [
                    twist,
                    packed % 3,
                    (packed / 3) % 3,
                    (packed / 9) % 3,
                    0,
                    0,
                    0,
                    0,
                ];
                let state = top_layer_state([4, 2, 1, 3, 0, 5, 6, 7], co);
                let name = classify(&CUBE3, &state).unwrap();
                let CaseName::TopLayer { shape, .. } = name else {
                    panic!("expected a top-layer case, got {name}");
                };
                assert!(shape < 27);
            }
        }
    }

    #[test]
    fn test_misplaced_center_is_reported() {
        let mut state = CubeState::solved();
        state.centers.permutation.swap(0, 1);
        let err = classify(&CUBE3, &state).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::InvalidState(InvariantViolation::MisplacedCenter("U"))
        );
        assert_eq!(
            err.to_string(),
            "not a pure last-layer-corner state: U center is misplaced"
        );
    }

    #[test]
    fn test_flipped_edge_is_reported() {
        let mut state = CubeState::solved();
        state.edges.orientation[2] = 1;
        assert_eq!(
            check_last_layer_only(&state),
            Err(InvariantViolation::MisorientedEdge("UB"))
        );
    }

    #[test]
    fn test_moved_bottom_corner_is_reported() {
        let mut state = CubeState::solved();
        state.corners.permutation.swap(5, 7);
        assert_eq!(
            check_last_layer_only(&state),
            Err(InvariantViolation::MisplacedCorner("DFL"))
        );
    }

    #[test]
    fn test_top_edge_cycle_is_tolerated() {
        let mut state = CubeState::solved();
        // A three-cycle of upper edges, as the Sune leaves behind
        state.edges.permutation = [0, 3, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11];
        assert_eq!(check_last_layer_only(&state), Ok(()));
    }
}
