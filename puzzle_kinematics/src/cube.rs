//! Runtime state algebra for the 3x3x3.
//!
//! A configuration is a permutation vector plus an orientation vector per
//! piece orbit. Configurations double as transformations: composing a state
//! with a move's transformation yields the state after the move, and every
//! transformation has a group inverse.

use std::{fmt::Display, ops::Deref, str::FromStr, sync::LazyLock};

use strum::EnumString;
use thiserror::Error;

use crate::ksolve::{KPUZZLE_3X3, KSolve, KSolveMove};

/// The three piece orbits of the 3x3x3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceClass {
    Centers,
    Edges,
    Corners,
}

impl PieceClass {
    #[must_use]
    pub const fn slot_count(self) -> usize {
        match self {
            PieceClass::Centers => 6,
            PieceClass::Edges => 12,
            PieceClass::Corners => 8,
        }
    }

    /// Orientation values of the orbit live in `[0, modulus)`. Center twist
    /// is not tracked, so its modulus is 1.
    #[must_use]
    pub const fn orientation_modulus(self) -> u8 {
        match self {
            PieceClass::Centers => 1,
            PieceClass::Edges => 2,
            PieceClass::Corners => 3,
        }
    }
}

/// One orbit's slice of a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrbitState<const N: usize> {
    /// `permutation[slot]` is the piece currently occupying `slot`.
    pub permutation: [u8; N],
    /// `orientation[slot]` is the twist of that piece, below the orbit's
    /// modulus.
    pub orientation: [u8; N],
}

impl<const N: usize> OrbitState<N> {
    fn solved() -> Self {
        OrbitState {
            permutation: std::array::from_fn(|slot| slot as u8),
            orientation: [0; N],
        }
    }

    fn compose(&self, other: &Self, modulus: u8) -> Self {
        let mut out = Self::solved();
        for slot in 0..N {
            let src = other.permutation[slot] as usize;
            out.permutation[slot] = self.permutation[src];
            out.orientation[slot] = (self.orientation[src] + other.orientation[slot]) % modulus;
        }
        out
    }

    fn inverse(&self, modulus: u8) -> Self {
        let mut out = Self::solved();
        for slot in 0..N {
            let dst = self.permutation[slot] as usize;
            out.permutation[dst] = slot as u8;
            out.orientation[dst] = (modulus - self.orientation[slot]) % modulus;
        }
        out
    }
}

/// A configuration of the 3x3x3, or equally the transformation carrying the
/// solved state to that configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    pub edges: OrbitState<12>,
    pub corners: OrbitState<8>,
    pub centers: OrbitState<6>,
}

impl Default for CubeState {
    fn default() -> CubeState {
        CubeState::solved()
    }
}

impl CubeState {
    #[must_use]
    pub fn solved() -> CubeState {
        CubeState {
            edges: OrbitState::solved(),
            corners: OrbitState::solved(),
            centers: OrbitState::solved(),
        }
    }

    /// Apply `other` after `self`.
    #[must_use]
    pub fn compose(&self, other: &CubeState) -> CubeState {
        CubeState {
            edges: self.edges.compose(
                &other.edges,
                PieceClass::Edges.orientation_modulus(),
            ),
            corners: self.corners.compose(
                &other.corners,
                PieceClass::Corners.orientation_modulus(),
            ),
            centers: self.centers.compose(
                &other.centers,
                PieceClass::Centers.orientation_modulus(),
            ),
        }
    }

    #[must_use]
    pub fn inverse(&self) -> CubeState {
        CubeState {
            edges: self.edges.inverse(PieceClass::Edges.orientation_modulus()),
            corners: self
                .corners
                .inverse(PieceClass::Corners.orientation_modulus()),
            centers: self
                .centers
                .inverse(PieceClass::Centers.orientation_modulus()),
        }
    }
}

/// A turnable axis: the six faces plus the whole-cube rotations.
#[derive(PartialEq, Eq, EnumString, Debug, Clone, Copy)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
    #[strum(serialize = "x")]
    X,
    #[strum(serialize = "y")]
    Y,
    #[strum(serialize = "z")]
    Z,
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Face::U => "U",
            Face::D => "D",
            Face::L => "L",
            Face::R => "R",
            Face::F => "F",
            Face::B => "B",
            Face::X => "x",
            Face::Y => "y",
            Face::Z => "z",
        };
        write!(f, "{name}")
    }
}

/// Represents the direction which to turn an axis. `Prime` represents a
/// counter-clockwise quarter turn, and `Double` a 180 degree turn.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Direction {
    Normal,
    Prime,
    Double,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Normal => write!(f, ""),
            Direction::Prime => write!(f, "'"),
            Direction::Double => write!(f, "2"),
        }
    }
}

impl Direction {
    #[must_use]
    pub fn quarter_turns(self) -> i32 {
        match self {
            Direction::Normal => 1,
            Direction::Prime => -1,
            Direction::Double => 2,
        }
    }
}

/// An instantiation of a certain axis equipped with a direction.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct MoveInstance {
    pub face: Face,
    pub dir: Direction,
}

impl MoveInstance {
    #[must_use]
    pub fn new(face: Face, dir: Direction) -> Self {
        Self { face, dir }
    }

    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            face: self.face,
            dir: match self.dir {
                Direction::Normal => Direction::Prime,
                Direction::Prime => Direction::Normal,
                x => x,
            },
        }
    }
}

impl Display for MoveInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face, self.dir)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Unrecognized move token {0:?}")]
    BadToken(String),
}

/// A sequence of moves in SiGN notation, used for representing setup and
/// solving sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSequence(Vec<MoveInstance>);

impl MoveSequence {
    #[must_use]
    pub fn from(vec: Vec<MoveInstance>) -> Self {
        Self(vec)
    }

    #[must_use]
    pub fn inverted(&self) -> Self {
        MoveSequence(self.iter().rev().map(MoveInstance::invert).collect())
    }
}

impl Deref for MoveSequence {
    type Target = Vec<MoveInstance>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs: Vec<String> = self.iter().map(MoveInstance::to_string).collect();
        write!(f, "{}", strs.join(" "))
    }
}

impl FromStr for MoveSequence {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut moves = vec![];
        for token in s.split_whitespace() {
            // "2'" and "2" denote the same half turn
            let (base, dir) = if let Some(rest) = token
                .strip_suffix("2'")
                .or_else(|| token.strip_suffix('2'))
            {
                (rest, Direction::Double)
            } else if let Some(rest) = token.strip_suffix('\'') {
                (rest, Direction::Prime)
            } else {
                (token, Direction::Normal)
            };
            let face = Face::from_str(base)
                .map_err(|_| MoveParseError::BadToken(token.to_owned()))?;
            moves.push(MoveInstance::new(face, dir));
        }
        Ok(MoveSequence(moves))
    }
}

/// A named transformation of a [`CubeDef`].
#[derive(Clone, Debug)]
pub struct NamedTransformation {
    pub name: String,
    pub state: CubeState,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DefConversionError {
    #[error("Missing piece orbit {0}")]
    MissingSet(&'static str),
    #[error("Piece orbit {0} must have {1} pieces with orientation modulus {2}")]
    WrongSetShape(&'static str, usize, u8),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("The definition has no transformation for axis {0}")]
pub struct UnknownAxis(pub Face);

/// A validated, runtime-ready puzzle definition: the transformation of
/// every face move and whole-cube rotation, indexed by name.
#[derive(Debug)]
pub struct CubeDef {
    name: String,
    moves: Vec<NamedTransformation>,
    rotations: Vec<NamedTransformation>,
}

impl CubeDef {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn find_move(&self, name: &str) -> Option<&NamedTransformation> {
        self.moves.iter().find(|def| def.name == name)
    }

    #[must_use]
    pub fn find_rotation(&self, name: &str) -> Option<&NamedTransformation> {
        self.rotations.iter().find(|def| def.name == name)
    }

    /// Get the single-quarter-turn transformation of an axis, whether it is
    /// a face move or a rotation.
    #[must_use]
    pub fn axis_transformation(&self, face: Face) -> Option<&CubeState> {
        let name = face.to_string();
        self.find_move(&name)
            .or_else(|| self.find_rotation(&name))
            .map(|def| &def.state)
    }

    /// Turn an axis by a signed number of quarter turns. Negative amounts
    /// turn counter-clockwise.
    ///
    /// # Errors
    ///
    /// Fails if the definition carries no transformation for `face`.
    pub fn apply_axis_turn(
        &self,
        state: &CubeState,
        face: Face,
        quarter_turns: i32,
    ) -> Result<CubeState, UnknownAxis> {
        let base = self.axis_transformation(face).ok_or(UnknownAxis(face))?;
        let mut amount = quarter_turns.rem_euclid(4);
        let step = if amount == 3 {
            amount = 1;
            base.inverse()
        } else {
            base.clone()
        };
        let mut out = state.clone();
        for _ in 0..amount {
            out = out.compose(&step);
        }
        Ok(out)
    }

    /// Apply a parsed move sequence, left to right.
    ///
    /// # Errors
    ///
    /// Fails on the first move whose axis the definition does not carry.
    pub fn apply_sequence(
        &self,
        state: &CubeState,
        sequence: &MoveSequence,
    ) -> Result<CubeState, UnknownAxis> {
        let mut out = state.clone();
        for instance in sequence.iter() {
            out = self.apply_axis_turn(&out, instance.face, instance.dir.quarter_turns())?;
        }
        Ok(out)
    }
}

impl TryFrom<&KSolve> for CubeDef {
    type Error = DefConversionError;

    fn try_from(ksolve: &KSolve) -> Result<Self, Self::Error> {
        let edges = set_index(ksolve, "EDGES", PieceClass::Edges)?;
        let corners = set_index(ksolve, "CORNERS", PieceClass::Corners)?;
        let centers = set_index(ksolve, "CENTERS", PieceClass::Centers)?;

        let convert = |ksolve_move: &KSolveMove| {
            let transformation = ksolve_move.zero_indexed_transformation();
            NamedTransformation {
                name: ksolve_move.name().to_owned(),
                state: CubeState {
                    edges: orbit_from(&transformation[edges]),
                    corners: orbit_from(&transformation[corners]),
                    centers: orbit_from(&transformation[centers]),
                },
            }
        };

        Ok(CubeDef {
            name: ksolve.name().to_owned(),
            moves: ksolve.moves().iter().map(convert).collect(),
            rotations: ksolve.symmetries().iter().map(convert).collect(),
        })
    }
}

fn set_index(
    ksolve: &KSolve,
    name: &'static str,
    class: PieceClass,
) -> Result<usize, DefConversionError> {
    let idx = ksolve
        .sets()
        .iter()
        .position(|set| set.name() == name)
        .ok_or(DefConversionError::MissingSet(name))?;
    let set = &ksolve.sets()[idx];
    if set.piece_count().get() as usize != class.slot_count()
        || set.orientation_count().get() != class.orientation_modulus()
    {
        return Err(DefConversionError::WrongSetShape(
            name,
            class.slot_count(),
            class.orientation_modulus(),
        ));
    }
    Ok(idx)
}

fn orbit_from<const N: usize>(transformation: &[(u16, u8)]) -> OrbitState<N> {
    let mut out = OrbitState::solved();
    for (slot, &(perm, orientation)) in transformation.iter().enumerate() {
        out.permutation[slot] = perm as u8;
        out.orientation[slot] = orientation;
    }
    out
}

/// The builtin 3x3x3 definition, converted and validated once per process.
pub static CUBE3: LazyLock<CubeDef> =
    LazyLock::new(|| CubeDef::try_from(&*KPUZZLE_3X3).expect("builtin 3x3x3 definition converts"));
