//! A representation of the 3x3x3 in the KSolve format. We choose to remain
//! consistent with KSolve format and terminology because it is the
//! lingua-franca of the puzzle theory community.
//!
//! Piece indexing follows the conventional facelet ordering:
//!
//! - EDGES: UF UR UB UL DF DR DB DL FR FL BR BL
//! - CORNERS: UFR URB UBL ULF DRF DFL DLB DBR
//! - CENTERS: U L F R B D
//!
//! A transformation lists, for each slot, the slot whose occupant moves into
//! it together with the orientation delta picked up on the way. Read at the
//! solved state, `permutation[slot]` is the identity of the piece now
//! occupying `slot`.

use std::{
    num::{NonZeroU8, NonZeroU16},
    sync::LazyLock,
};

use itertools::Itertools;
use thiserror::Error;

/// A puzzle definition: piece orbits ("sets"), face moves, and whole-puzzle
/// symmetry rotations.
#[derive(Clone, Debug, PartialEq)]
pub struct KSolve {
    name: String,
    sets: Vec<KSolveSet>,
    moves: Vec<KSolveMove>,
    symmetries: Vec<KSolveMove>,
}

/// A piece orbit of a KSolve puzzle, or "Set" to remain consistent with the
/// KSolve terminology.
#[derive(Clone, Debug, PartialEq)]
pub struct KSolveSet {
    name: String,
    piece_count: NonZeroU16,
    orientation_count: NonZeroU8,
}

/// A transformation of a KSolve puzzle. A list of (permutation vector,
/// orientation vector) per set, 1-indexed.
pub type KSolveTransformation = Vec<Vec<(NonZeroU16, u8)>>;

#[derive(Clone, Debug, PartialEq)]
pub struct KSolveMove {
    transformation: KSolveTransformation,
    name: String,
}

#[derive(Error, Debug)]
pub enum KSolveConstructionError {
    #[error("Invalid set count, expected {0} sets but got {1}")]
    InvalidSetCount(usize, usize),
    #[error("Invalid piece count, expected {0} pieces but got {1}")]
    InvalidPieceCount(u16, usize),
    #[error("Invalid orientation delta, expected a value below {0} but got {1}")]
    InvalidOrientationDelta(u8, u8),
    #[error("Permutation out of range, expected a value between 1 and {0} but got {1}")]
    PermutationOutOfRange(u16, u16),
    #[error("Permutation of move {0} is not a bijection")]
    PermutationNotBijective(String),
}

impl KSolve {
    /// Assemble a puzzle definition, checking every move and symmetry
    /// against the declared sets.
    ///
    /// # Errors
    ///
    /// Returns a [`KSolveConstructionError`] describing the first
    /// transformation that does not fit the sets.
    pub fn new(
        name: String,
        sets: Vec<KSolveSet>,
        moves: Vec<KSolveMove>,
        symmetries: Vec<KSolveMove>,
    ) -> Result<KSolve, KSolveConstructionError> {
        for ksolve_move in moves.iter().chain(symmetries.iter()) {
            ksolve_move.validate_against(&sets)?;
        }
        Ok(KSolve {
            name,
            sets,
            moves,
            symmetries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the piece orbits of the puzzle.
    pub fn sets(&self) -> &[KSolveSet] {
        &self.sets
    }

    /// Get the face moves of the puzzle.
    pub fn moves(&self) -> &[KSolveMove] {
        &self.moves
    }

    /// Get the whole-puzzle rotations obeyed by the puzzle.
    pub fn symmetries(&self) -> &[KSolveMove] {
        &self.symmetries
    }

    /// Get the solved state of the puzzle.
    pub fn solved(&self) -> KSolveTransformation {
        self.sets
            .iter()
            .map(|ksolve_set| {
                (1..=ksolve_set.piece_count.get())
                    .map(|i| (i.try_into().unwrap(), 0))
                    .collect()
            })
            .collect()
    }
}

impl KSolveSet {
    #[must_use]
    pub fn new(name: String, piece_count: NonZeroU16, orientation_count: NonZeroU8) -> KSolveSet {
        KSolveSet {
            name,
            piece_count,
            orientation_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn piece_count(&self) -> NonZeroU16 {
        self.piece_count
    }

    /// Get the orientation modulus of the set.
    pub fn orientation_count(&self) -> NonZeroU8 {
        self.orientation_count
    }
}

impl KSolveMove {
    #[must_use]
    pub fn new(name: String, transformation: KSolveTransformation) -> KSolveMove {
        KSolveMove {
            transformation,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transformation(&self) -> &KSolveTransformation {
        &self.transformation
    }

    /// Convenience method for converting KSolve's 1-indexed permutation
    /// vectors to 0-indexed permutation vectors.
    pub fn zero_indexed_transformation(&self) -> Vec<Vec<(u16, u8)>> {
        self.transformation
            .iter()
            .map(|perm_and_ori| {
                perm_and_ori
                    .iter()
                    .map(|&(p, o)| (p.get() - 1, o))
                    .collect()
            })
            .collect()
    }

    fn validate_against(&self, sets: &[KSolveSet]) -> Result<(), KSolveConstructionError> {
        if self.transformation.len() != sets.len() {
            return Err(KSolveConstructionError::InvalidSetCount(
                sets.len(),
                self.transformation.len(),
            ));
        }
        for (transformation, set) in self.transformation.iter().zip(sets) {
            let piece_count = set.piece_count.get();
            if transformation.len() != piece_count as usize {
                return Err(KSolveConstructionError::InvalidPieceCount(
                    piece_count,
                    transformation.len(),
                ));
            }
            let max_orientation_delta = set.orientation_count.get() - 1;
            for &(perm, orientation_delta) in transformation {
                if orientation_delta > max_orientation_delta {
                    return Err(KSolveConstructionError::InvalidOrientationDelta(
                        set.orientation_count.get(),
                        orientation_delta,
                    ));
                }
                if perm.get() > piece_count {
                    return Err(KSolveConstructionError::PermutationOutOfRange(
                        piece_count,
                        perm.get(),
                    ));
                }
            }
            if transformation.iter().map(|&(p, _)| p).duplicates().count() > 0 {
                return Err(KSolveConstructionError::PermutationNotBijective(
                    self.name.clone(),
                ));
            }
        }
        Ok(())
    }
}

pub fn nonzero_perm(transformation: Vec<Vec<(u16, u8)>>) -> KSolveTransformation {
    transformation
        .iter()
        .map(|perm_and_ori| {
            perm_and_ori
                .iter()
                .map(|&(p, o)| (p.try_into().unwrap(), o))
                .collect()
        })
        .collect()
}

pub static KPUZZLE_3X3: LazyLock<KSolve> = LazyLock::new(|| {
    KSolve::new(
        "3x3x3".to_owned(),
        vec![
            KSolveSet {
                name: "EDGES".to_owned(),
                piece_count: 12.try_into().unwrap(),
                orientation_count: 2.try_into().unwrap(),
            },
            KSolveSet {
                name: "CORNERS".to_owned(),
                piece_count: 8.try_into().unwrap(),
                orientation_count: 3.try_into().unwrap(),
            },
            KSolveSet {
                name: "CENTERS".to_owned(),
                piece_count: 6.try_into().unwrap(),
                // Center twist is not tracked
                orientation_count: 1.try_into().unwrap(),
            },
        ],
        vec![
            KSolveMove {
                name: "U".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (1, 0),
                        (5, 0),
                        (6, 0),
                        (7, 0),
                        (8, 0),
                        (9, 0),
                        (10, 0),
                        (11, 0),
                        (12, 0),
                    ],
                    vec![
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (1, 0),
                        (5, 0),
                        (6, 0),
                        (7, 0),
                        (8, 0),
                    ],
                    vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
                ]),
            },
            KSolveMove {
                name: "L".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (1, 0),
                        (2, 0),
                        (3, 0),
                        (12, 0),
                        (5, 0),
                        (6, 0),
                        (7, 0),
                        (4, 0),
                        (9, 0),
                        (10, 0),
                        (11, 0),
                        (8, 0),
                    ],
                    vec![
                        (1, 0),
                        (2, 0),
                        (4, 2),
                        (6, 1),
                        (5, 0),
                        (7, 2),
                        (3, 1),
                        (8, 0),
                    ],
                    vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
                ]),
            },
            KSolveMove {
                name: "F".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (10, 1),
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (9, 1),
                        (6, 0),
                        (7, 0),
                        (8, 0),
                        (1, 1),
                        (5, 1),
                        (11, 0),
                        (12, 0),
                    ],
                    vec![
                        (4, 1),
                        (2, 0),
                        (3, 0),
                        (6, 2),
                        (1, 2),
                        (5, 1),
                        (7, 0),
                        (8, 0),
                    ],
                    vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
                ]),
            },
            KSolveMove {
                name: "R".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (1, 0),
                        (9, 0),
                        (3, 0),
                        (4, 0),
                        (5, 0),
                        (11, 0),
                        (7, 0),
                        (8, 0),
                        (6, 0),
                        (10, 0),
                        (2, 0),
                        (12, 0),
                    ],
                    vec![
                        (5, 2),
                        (1, 1),
                        (3, 0),
                        (4, 0),
                        (8, 1),
                        (6, 0),
                        (7, 0),
                        (2, 2),
                    ],
                    vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
                ]),
            },
            KSolveMove {
                name: "B".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (1, 0),
                        (2, 0),
                        (11, 1),
                        (4, 0),
                        (5, 0),
                        (6, 0),
                        (12, 1),
                        (8, 0),
                        (9, 0),
                        (10, 0),
                        (7, 1),
                        (3, 1),
                    ],
                    vec![
                        (1, 0),
                        (8, 2),
                        (2, 1),
                        (4, 0),
                        (5, 0),
                        (6, 0),
                        (3, 2),
                        (7, 1),
                    ],
                    vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
                ]),
            },
            KSolveMove {
                name: "D".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (1, 0),
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (8, 0),
                        (5, 0),
                        (6, 0),
                        (7, 0),
                        (9, 0),
                        (10, 0),
                        (11, 0),
                        (12, 0),
                    ],
                    vec![
                        (1, 0),
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (6, 0),
                        (7, 0),
                        (8, 0),
                        (5, 0),
                    ],
                    vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
                ]),
            },
        ],
        vec![
            KSolveMove {
                name: "x".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (5, 1),
                        (9, 0),
                        (1, 1),
                        (10, 0),
                        (7, 1),
                        (11, 0),
                        (3, 1),
                        (12, 0),
                        (6, 0),
                        (8, 0),
                        (2, 0),
                        (4, 0),
                    ],
                    vec![
                        (5, 2),
                        (1, 1),
                        (4, 2),
                        (6, 1),
                        (8, 1),
                        (7, 2),
                        (3, 1),
                        (2, 2),
                    ],
                    vec![(3, 0), (2, 0), (6, 0), (4, 0), (1, 0), (5, 0)],
                ]),
            },
            KSolveMove {
                name: "y".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (1, 0),
                        (6, 0),
                        (7, 0),
                        (8, 0),
                        (5, 0),
                        (11, 1),
                        (9, 1),
                        (12, 1),
                        (10, 1),
                    ],
                    vec![
                        (2, 0),
                        (3, 0),
                        (4, 0),
                        (1, 0),
                        (8, 0),
                        (5, 0),
                        (6, 0),
                        (7, 0),
                    ],
                    vec![(1, 0), (3, 0), (4, 0), (5, 0), (2, 0), (6, 0)],
                ]),
            },
            KSolveMove {
                name: "z".to_owned(),
                transformation: nonzero_perm(vec![
                    vec![
                        (10, 1),
                        (4, 1),
                        (12, 1),
                        (8, 1),
                        (9, 1),
                        (2, 1),
                        (11, 1),
                        (6, 1),
                        (1, 1),
                        (5, 1),
                        (3, 1),
                        (7, 1),
                    ],
                    vec![
                        (4, 1),
                        (3, 2),
                        (7, 1),
                        (6, 2),
                        (1, 2),
                        (5, 1),
                        (8, 2),
                        (2, 1),
                    ],
                    vec![(2, 0), (6, 0), (3, 0), (1, 0), (5, 0), (4, 0)],
                ]),
            },
        ],
    )
    .expect("builtin 3x3x3 definition is valid")
});
