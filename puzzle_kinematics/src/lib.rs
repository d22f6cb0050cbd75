//! Kinematics for the 3x3x3 puzzle.
//!
//! The state of the puzzle is represented by a permutation vector and an
//! orientation vector per piece orbit (edges, corners, centers). A tuple of
//! these vectors uniquely determines a configuration, and configurations
//! form a group under composition.
//!
//! Definition data lives in [`ksolve`], in the KSolve format. We choose to
//! remain consistent with KSolve terminology because it is the lingua-franca
//! of the puzzle theory community. The runtime state algebra and move
//! notation live in [`cube`].

#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]

pub mod cube;
pub mod ksolve;

pub use cube::{
    CUBE3, CubeDef, CubeState, Direction, Face, MoveInstance, MoveParseError, MoveSequence,
    OrbitState, PieceClass, UnknownAxis,
};
pub use ksolve::{KSolve, KSolveConstructionError, KSolveMove, KSolveSet, KPUZZLE_3X3};
