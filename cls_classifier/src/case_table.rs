//! The reference case list and bulk table construction.
//!
//! Reference records pair a solving sequence with display metadata. The
//! table key is never taken from the record: every sequence is inverted,
//! normalized, and classified, so records that solve the same case group
//! together no matter how they were written down.

use std::collections::BTreeMap;

use itertools::Itertools;
use puzzle_kinematics::{CubeDef, CubeState, MoveParseError, MoveSequence, UnknownAxis};
use thiserror::Error;

use crate::{
    classify::{CaseName, ClassifyError, classify},
    normalize::SymmetryNormalizer,
};

/// One record of the reference list. The label is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseRecord {
    pub label: &'static str,
    pub algorithm: &'static str,
    pub difficulty: &'static str,
    pub comment: &'static str,
}

#[derive(Error, Debug)]
pub enum CaseLookupError {
    #[error(transparent)]
    BadSequence(#[from] MoveParseError),
    #[error(transparent)]
    UnknownAxis(#[from] UnknownAxis),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// The built-in reference list of last-layer-corner solving sequences.
pub static REFERENCE_CASES: &[CaseRecord] = &[
    CaseRecord {
        label: "C1",
        algorithm: "R U R' U R U2 R'",
        difficulty: "*",
        comment: "the Sune; two-gen and regrip-free",
    },
    CaseRecord {
        label: "C1",
        algorithm: "U R U R' U R U2 R' U'",
        difficulty: "**",
        comment: "Sune from the next angle",
    },
    CaseRecord {
        label: "C1",
        algorithm: "R U R' U R U2 R' y",
        difficulty: "**",
        comment: "rotation finish when the next slot is at the back",
    },
    CaseRecord {
        label: "C2",
        algorithm: "R U2 R' U' R U' R'",
        difficulty: "*",
        comment: "the Antisune",
    },
    CaseRecord {
        label: "C3",
        algorithm: "R U R' U R U' R' U R U2 R'",
        difficulty: "**",
        comment: "double Sune",
    },
    CaseRecord {
        label: "O7",
        algorithm: "R U R' U' R U R' U' R U R' U'",
        difficulty: "*",
        comment: "triple sexy; pure flowing pair swap",
    },
    CaseRecord {
        label: "O7",
        algorithm: "U R U' R' U R U' R' U R U' R'",
        difficulty: "**",
        comment: "triple sexy inverted",
    },
    CaseRecord {
        label: "O3",
        algorithm: "R U R' U' R U R' U' R U R' U' R U R' U R U2 R'",
        difficulty: "***",
        comment: "triple sexy into Sune",
    },
    CaseRecord {
        label: "-22",
        algorithm: "R U R' U R U' R' U' R U R' U' R U R' U'",
        difficulty: "***",
        comment: "Sune into triple sexy",
    },
    CaseRecord {
        label: "-22",
        algorithm: "U R U R' U R U' R' U' R U R' U' R U R' U'",
        difficulty: "***",
        comment: "same from the next angle",
    },
    CaseRecord {
        label: "+9",
        algorithm: "R U2 R' U2 R U R' U' R U R' U'",
        difficulty: "**",
        comment: "Antisune into triple sexy, cancelled",
    },
];

/// Classify the case a solving sequence handles: the case state is the
/// inverse of the sequence brought into canonical orientation.
///
/// # Errors
///
/// Fails if the sequence names an axis the definition lacks or if the
/// resulting state cannot be classified.
pub fn case_for_sequence(
    def: &CubeDef,
    normalizer: &SymmetryNormalizer,
    sequence: &MoveSequence,
) -> Result<CaseName, CaseLookupError> {
    let state = def.apply_sequence(&CubeState::solved(), &sequence.inverted())?;
    let canonical = normalizer.pre_normalize(&state);
    Ok(classify(def, &canonical)?)
}

/// Mapping from computed case name to the records that solve it, in
/// reference-list order per case.
#[derive(Debug, Default)]
pub struct CaseTable {
    entries: BTreeMap<CaseName, Vec<CaseRecord>>,
}

impl CaseTable {
    /// Drive every record through the classification pipeline. Records that
    /// fail to parse or classify are logged and skipped; a bad record never
    /// aborts the batch.
    #[must_use]
    pub fn build(
        def: &CubeDef,
        normalizer: &SymmetryNormalizer,
        records: &[CaseRecord],
    ) -> CaseTable {
        let grouped = records
            .iter()
            .filter_map(|record| {
                let case = record
                    .algorithm
                    .parse::<MoveSequence>()
                    .map_err(CaseLookupError::from)
                    .and_then(|sequence| case_for_sequence(def, normalizer, &sequence));
                match case {
                    Ok(name) => Some((name, *record)),
                    Err(err) => {
                        log::warn!(
                            "skipping {:?} ({:?}): {err}",
                            record.label,
                            record.algorithm
                        );
                        None
                    }
                }
            })
            .into_group_map();
        CaseTable {
            entries: grouped.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn variants(&self, name: CaseName) -> &[CaseRecord] {
        self.entries.get(&name).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CaseName, &[CaseRecord])> {
        self.entries
            .iter()
            .map(|(name, records)| (*name, records.as_slice()))
    }

    #[must_use]
    pub fn case_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use puzzle_kinematics::CUBE3;

    use super::*;

    #[test]
    fn test_bad_records_are_skipped_not_fatal() {
        let records = [
            CaseRecord {
                label: "junk notation",
                algorithm: "R UU Q'",
                difficulty: "*",
                comment: "",
            },
            CaseRecord {
                label: "not a corner case",
                algorithm: "F",
                difficulty: "*",
                comment: "disturbs the front face",
            },
            CaseRecord {
                label: "C1",
                algorithm: "R U R' U R U2 R'",
                difficulty: "*",
                comment: "",
            },
        ];
        let normalizer = SymmetryNormalizer::new(&CUBE3);
        let table = CaseTable::build(&CUBE3, &normalizer, &records);
        assert_eq!(table.variant_count(), 1);
        assert_eq!(table.case_count(), 1);
    }

    #[test]
    fn test_variants_of_missing_case_are_empty() {
        let table = CaseTable::default();
        assert!(table.is_empty());
        assert!(
            table
                .variants(CaseName::TopLayer {
                    twist: crate::classify::DrfTwist::Oriented,
                    shape: 0
                })
                .is_empty()
        );
    }
}
