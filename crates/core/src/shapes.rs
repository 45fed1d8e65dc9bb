//! Shapes module - the seven canonical shapes and clockwise rotation
//!
//! A shape is a small boolean grid anchored at its own top-left corner.
//! Rotation is a pure grid transform: reverse the row order, then transpose.
//! It never checks bounds or collisions; placement validity is the engine's job.

use crate::rng::PieceRng;
use crate::types::{PieceKind, MAX_SHAPE_SIZE};

/// Immutable occupancy grid of 2..=4 rows by 2..=4 columns.
///
/// Cells outside `width x height` in the backing array are always clear,
/// so derived equality compares shapes cell-for-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Build a shape from a row-major 0/1 literal.
    ///
    /// Panics (at compile time when used in a `const`) if either dimension
    /// falls outside `2..=4`.
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W >= 2 && W <= MAX_SHAPE_SIZE, "shape width out of range");
        assert!(H >= 2 && H <= MAX_SHAPE_SIZE, "shape height out of range");

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < H {
            let mut col = 0;
            while col < W {
                cells[row][col] = rows[row][col] != 0;
                col += 1;
            }
            row += 1;
        }

        Self {
            cells,
            width: W as u8,
            height: H as u8,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the local cell is occupied. Anything outside the shape is not.
    #[inline(always)]
    pub fn is_set(&self, col: i8, row: i8) -> bool {
        if col < 0 || row < 0 || col >= self.width as i8 || row >= self.height as i8 {
            return false;
        }
        self.cells[row as usize][col as usize]
    }

    /// Local `(col, row)` offsets of the occupied cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as i8).flat_map(move |row| {
            (0..self.width as i8)
                .filter(move |&col| self.cells[row as usize][col as usize])
                .map(move |col| (col, row))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Rotate 90° clockwise.
    ///
    /// `new[i][j] = old[h-1-j][i]`; width and height swap.
    pub fn rotated_cw(&self) -> Self {
        let old_h = self.height as usize;
        let new_w = self.height;
        let new_h = self.width;

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(new_h as usize) {
            for (j, cell) in row.iter_mut().enumerate().take(new_w as usize) {
                *cell = self.cells[old_h - 1 - j][i];
            }
        }

        Self {
            cells,
            width: new_w,
            height: new_h,
        }
    }
}

/// Free-function form of [`Shape::rotated_cw`].
pub fn rotate_cw(shape: &Shape) -> Shape {
    shape.rotated_cw()
}

const S_SHAPE: Shape = Shape::from_rows([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = Shape::from_rows([[1, 1, 0], [0, 1, 1]]);
const O_SHAPE: Shape = Shape::from_rows([[1, 1], [1, 1]]);
const T_SHAPE: Shape = Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const I_SHAPE: Shape = Shape::from_rows([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);
const J_SHAPE: Shape = Shape::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);
const L_SHAPE: Shape = Shape::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);

/// Spawn orientation of a piece kind.
pub fn canonical(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Pick one of the seven kinds uniformly and return it with its shape.
pub fn random_shape(rng: &mut impl PieceRng) -> (PieceKind, Shape) {
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    let kind = PieceKind::ALL[idx];
    (kind, canonical(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn test_catalog_dimensions() {
        let dims: Vec<(u8, u8)> = PieceKind::ALL
            .iter()
            .map(|&k| (canonical(k).width(), canonical(k).height()))
            .collect();
        assert_eq!(
            dims,
            vec![(3, 2), (3, 2), (2, 2), (3, 3), (4, 4), (3, 3), (3, 3)]
        );
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(canonical(kind).cell_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_is_set_outside_is_clear() {
        let o = canonical(PieceKind::O);
        assert!(o.is_set(0, 0));
        assert!(o.is_set(1, 1));
        assert!(!o.is_set(2, 0));
        assert!(!o.is_set(0, 2));
        assert!(!o.is_set(-1, 0));
    }

    #[test]
    fn test_cells_row_major() {
        let s = canonical(PieceKind::S);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_rotate_s_swaps_dimensions() {
        let s = canonical(PieceKind::S);
        let r = s.rotated_cw();
        assert_eq!((r.width(), r.height()), (2, 3));
        // [[0,1,1],[1,1,0]] -> [[1,0],[1,1],[0,1]]
        assert_eq!(r, Shape::from_rows([[1, 0], [1, 1], [0, 1]]));
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let r = rotate_cw(&canonical(PieceKind::I));
        let expected = Shape::from_rows([
            [0, 0, 1, 0],
            [0, 0, 1, 0],
            [0, 0, 1, 0],
            [0, 0, 1, 0],
        ]);
        assert_eq!(r, expected);
    }

    #[test]
    fn test_rotate_t() {
        let r = canonical(PieceKind::T).rotated_cw();
        assert_eq!(r, Shape::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]]));
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = canonical(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_four_rotations_identity() {
        for kind in PieceKind::ALL {
            let shape = canonical(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_random_shape_follows_rng() {
        let mut rng = ScriptedRng::new(vec![0, 2, 4, 6]);
        let picks: Vec<_> = (0..4).map(|_| random_shape(&mut rng).0).collect();
        assert_eq!(
            picks,
            vec![PieceKind::S, PieceKind::O, PieceKind::I, PieceKind::L]
        );
    }

    #[test]
    fn test_random_shape_returns_canonical() {
        let mut rng = ScriptedRng::new(vec![3]);
        let (kind, shape) = random_shape(&mut rng);
        assert_eq!(kind, PieceKind::T);
        assert_eq!(shape, canonical(PieceKind::T));
    }
}
