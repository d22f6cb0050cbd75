//! Classification of last-layer-corner configurations of the 3x3x3.
//!
//! Any reachable configuration is first brought into a canonical
//! orientation by undoing its whole-cube rotation, then named as one of a
//! fixed set of cases, tolerating any turn of the upper face. The pipeline
//! is [`SymmetryNormalizer::pre_normalize`] →
//! [`classify::check_last_layer_only`] → [`classify::classify`], and
//! [`CaseTable::build`] drives it in bulk over a reference list of named
//! solving sequences.

#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]

pub mod case_table;
pub mod classify;
pub mod normalize;

pub use case_table::{CaseLookupError, CaseRecord, CaseTable, REFERENCE_CASES, case_for_sequence};
pub use classify::{
    CaseName, ClassifyError, DrfTwist, InvariantViolation, PlacedFamily, check_last_layer_only,
    classify,
};
pub use normalize::{SymmetryNormalizer, orientation_key};
