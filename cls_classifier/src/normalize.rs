//! Whole-cube orientation normalization.
//!
//! There are exactly 24 configurations whose only effect is to reorient the
//! cube as a rigid body. Fixing where two adjacent-axis centers map fixes
//! the whole rotation, so a pair of center indices addresses a 6×6 table of
//! which 24 cells are populated. Each cell stores the element that undoes
//! its rotation; composing a state with its cell brings the centers back to
//! the identity permutation.

use std::str::FromStr;

use puzzle_kinematics::{CubeDef, CubeState, Face, MoveSequence};

/// The orientation key of a state: the identity of the center now in the U
/// slot, and the center now in the L slot compressed into `0..4` by
/// discounting the occupants of the U/D axis.
#[must_use]
pub fn orientation_key(state: &CubeState) -> (usize, usize) {
    let centers = &state.centers.permutation;
    let idx_u = centers[0] as usize;
    let idx_d = centers[5] as usize;
    let unadjusted_idx_l = centers[1] as usize;
    let mut idx_l = unadjusted_idx_l;
    if idx_u < unadjusted_idx_l {
        idx_l -= 1;
    }
    if idx_d < unadjusted_idx_l {
        idx_l -= 1;
    }
    (idx_u, idx_l)
}

/// Precomputed undo elements for the 24 whole-cube rotations, built once
/// and immutable afterwards. Shareable across any number of normalization
/// calls.
#[derive(Debug)]
pub struct SymmetryNormalizer {
    cells: [[Option<CubeState>; 6]; 6],
}

impl SymmetryNormalizer {
    /// Enumerate the 24 rotations as six tilts crossed with four quarter
    /// turns about the resulting vertical axis, storing the inverse of each
    /// rotation at its orientation key.
    ///
    /// # Panics
    ///
    /// Panics if `def` lacks the x/y/z rotations or if two rotations
    /// collide on a key; both mean the definition is malformed.
    #[must_use]
    pub fn new(def: &CubeDef) -> SymmetryNormalizer {
        let mut cells: [[Option<CubeState>; 6]; 6] = Default::default();
        for tilt in ["", "z", "x", "z'", "x'", "x2"] {
            let sequence = MoveSequence::from_str(tilt).expect("tilt sequences parse");
            let mut rotation = def
                .apply_sequence(&CubeState::solved(), &sequence)
                .expect("definition carries the tilt rotations");
            for _ in 0..4 {
                rotation = def
                    .apply_axis_turn(&rotation, Face::Y, 1)
                    .expect("definition carries the y rotation");
                let (idx_u, idx_l) = orientation_key(&rotation);
                let cell = &mut cells[idx_u][idx_l];
                assert!(
                    cell.is_none(),
                    "two rotations share the orientation key ({idx_u}, {idx_l})"
                );
                *cell = Some(rotation.inverse());
            }
        }
        SymmetryNormalizer { cells }
    }

    /// Map a state to its canonical-orientation equivalent: the unique
    /// composition with a whole-cube rotation whose centers are back in the
    /// identity permutation. Pure once the table exists.
    ///
    /// # Panics
    ///
    /// Panics if the centers permutation is not one of the 24 rotations,
    /// which cannot happen for a reachable state.
    #[must_use]
    pub fn normalize(&self, state: &CubeState) -> CubeState {
        let (idx_u, idx_l) = orientation_key(state);
        let element = self.cells[idx_u][idx_l]
            .as_ref()
            .expect("centers permutation is not a whole-cube rotation");
        state.compose(element)
    }

    /// Normalize the inverse of a state and re-invert the result.
    ///
    /// A sequence that solves a case is the inverse of the case's setup, so
    /// the classification pipeline naturally works on states produced
    /// backwards; this keeps the caller's frame.
    #[must_use]
    pub fn pre_normalize(&self, state: &CubeState) -> CubeState {
        self.normalize(&state.inverse()).inverse()
    }
}

#[cfg(test)]
mod tests {
    use puzzle_kinematics::CUBE3;

    use super::*;

    fn state_of(alg: &str) -> CubeState {
        let sequence = MoveSequence::from_str(alg).unwrap();
        CUBE3.apply_sequence(&CubeState::solved(), &sequence).unwrap()
    }

    #[test]
    fn test_table_has_exactly_24_cells() {
        let normalizer = SymmetryNormalizer::new(&CUBE3);
        let populated: usize = normalizer
            .cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(populated, 24);
    }

    #[test]
    fn test_every_cell_undoes_its_own_rotation() {
        let normalizer = SymmetryNormalizer::new(&CUBE3);
        for (idx_u, row) in normalizer.cells.iter().enumerate() {
            for (idx_l, cell) in row.iter().enumerate() {
                let Some(element) = cell else { continue };
                let rotation = element.inverse();
                assert_eq!(orientation_key(&rotation), (idx_u, idx_l));
                assert_eq!(normalizer.normalize(&rotation), CubeState::solved());
            }
        }
    }

    #[test]
    fn test_normalize_fixes_centers() {
        let normalizer = SymmetryNormalizer::new(&CUBE3);
        for alg in [
            "x",
            "y z",
            "R x U y2",
            "z' L D2 x' F",
            "x y z x' y' z'",
            "B2 z U' x2 L y'",
        ] {
            let normalized = normalizer.normalize(&state_of(alg));
            assert_eq!(
                normalized.centers.permutation,
                [0, 1, 2, 3, 4, 5],
                "{alg}"
            );
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = SymmetryNormalizer::new(&CUBE3);
        for alg in ["x", "R x U y2", "z' L D2 x' F"] {
            let once = normalizer.normalize(&state_of(alg));
            assert_eq!(normalizer.normalize(&once), once, "{alg}");
        }
    }

    #[test]
    fn test_pre_normalize_keeps_canonical_states() {
        let normalizer = SymmetryNormalizer::new(&CUBE3);
        let canonical = state_of("R U R' U R U2 R'");
        assert_eq!(normalizer.pre_normalize(&canonical), canonical);
        assert_eq!(
            normalizer.pre_normalize(&CubeState::solved()),
            CubeState::solved()
        );
    }
}
