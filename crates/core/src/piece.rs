//! Active piece - the shape currently under player control
//!
//! Pieces are `Copy` values. Moving or rotating returns a new piece, and the
//! engine swaps its single owned piece only after the candidate is accepted.

use crate::rng::PieceRng;
use crate::shapes::{canonical, random_shape, Shape};
use crate::types::PieceKind;

/// Falling piece: kind, current rotation state and board anchor.
///
/// `(x, y)` is the board coordinate of the shape's top-left cell. Anchors may
/// be negative when the shape's leading rows or columns are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place the spawn orientation of `kind` at the top-center of a board
    /// `columns` wide.
    pub fn new(kind: PieceKind, columns: u8) -> Self {
        Self::at_spawn(kind, canonical(kind), columns)
    }

    /// Pick a random kind and place it at the top-center.
    pub fn spawn(columns: u8, rng: &mut impl PieceRng) -> Self {
        let (kind, shape) = random_shape(rng);
        Self::at_spawn(kind, shape, columns)
    }

    fn at_spawn(kind: PieceKind, shape: Shape, columns: u8) -> Self {
        Self {
            kind,
            shape,
            x: (columns / 2) as i8 - (shape.width() / 2) as i8,
            y: 0,
        }
    }

    /// Whether the piece covers board cell `(x, y)`. Defined for every
    /// coordinate, including ones far outside any board.
    #[inline(always)]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        let col = x as i16 - self.x as i16;
        let row = y as i16 - self.y as i16;
        match (i8::try_from(col), i8::try_from(row)) {
            (Ok(col), Ok(row)) => self.shape.is_set(col, row),
            _ => false,
        }
    }

    /// Copy shifted by `(dx, dy)`; the shape is untouched.
    ///
    /// The anchor saturates at the `i8` range, which is far outside any
    /// valid board.
    pub fn with_anchor(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Copy with the shape rotated clockwise about the same anchor.
    pub fn with_rotated_shape(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Absolute `(x, y)` board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.cells().map(move |(col, row)| {
            (self.x.saturating_add(col), self.y.saturating_add(row))
        })
    }
}
