//! Four-dimensional board storage.
//!
//! Cells live in one flat buffer addressed row-major over `[x][y][z][w]`.
//! Placement is append-only: a cell that holds a stone is never cleared
//! or overwritten.

use serde::{Deserialize, Serialize, Serializer};

use super::game::GameError;
use super::player::Player;

/// Number of board dimensions.
pub const DIMENSIONS: usize = 4;

/// Extent of the board along each dimension.
pub type BoardShape = [usize; DIMENSIONS];

/// A step between neighbouring cells, components in {-1, 0, 1}.
pub type Direction = [isize; DIMENSIONS];

/// Board coordinate. Serialized as `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; DIMENSIONS]", into = "[usize; DIMENSIONS]")]
pub struct Position {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub w: usize,
}

impl Position {
    pub fn new(x: usize, y: usize, z: usize, w: usize) -> Self {
        Self { x, y, z, w }
    }

    /// Convert client-supplied coordinates. Negative components have no position.
    pub fn from_signed(coords: [i64; DIMENSIONS]) -> Option<Self> {
        let [x, y, z, w] = coords;
        Some(Self::new(
            usize::try_from(x).ok()?,
            usize::try_from(y).ok()?,
            usize::try_from(z).ok()?,
            usize::try_from(w).ok()?,
        ))
    }

    pub fn coords(&self) -> [usize; DIMENSIONS] {
        [self.x, self.y, self.z, self.w]
    }

    /// Position `steps` cells away along `direction`, if no component goes negative.
    pub fn step(&self, direction: Direction, steps: usize) -> Option<Self> {
        let mut out = [0usize; DIMENSIONS];
        for (i, (c, d)) in self.coords().into_iter().zip(direction).enumerate() {
            let delta = d.checked_mul(steps as isize)?;
            out[i] = c.checked_add_signed(delta)?;
        }
        Some(out.into())
    }

    /// Check if position lies inside `shape`.
    pub fn is_within(&self, shape: &BoardShape) -> bool {
        self.coords().iter().zip(shape).all(|(c, s)| c < s)
    }
}

impl From<[usize; DIMENSIONS]> for Position {
    fn from([x, y, z, w]: [usize; DIMENSIONS]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<Position> for [usize; DIMENSIONS] {
    fn from(pos: Position) -> Self {
        pos.coords()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

/// A placed stone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stone {
    pub player: Player,
    pub position: Position,
}

impl Stone {
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    pub fn is_owned_by(&self, player: &Player) -> bool {
        self.player.index == player.index
    }
}

/// Number of cells in a board of this shape, `None` on overflow.
pub fn shape_cells(shape: &BoardShape) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Fixed-shape 4D grid of optional stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    shape: BoardShape,
    cells: Vec<Option<Stone>>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if the cell count overflows `usize`. Shapes accepted by
    /// `GameConfig::validate` never do.
    pub fn new(shape: BoardShape) -> Self {
        let cells = shape_cells(&shape).unwrap_or_else(|| panic!("board {:?} is too large", shape));
        Self {
            shape,
            cells: vec![None; cells],
        }
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if no stone has been placed yet.
    pub fn has_no_stones(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Linear offset of a position, `None` when out of range.
    fn offset(&self, pos: &Position) -> Option<usize> {
        if !pos.is_within(&self.shape) {
            return None;
        }
        let [_, sy, sz, sw] = self.shape;
        Some(((pos.x * sy + pos.y) * sz + pos.z) * sw + pos.w)
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.is_within(&self.shape)
    }

    /// Stone at a position. Empty and out-of-range cells both yield `None`.
    pub fn get(&self, pos: &Position) -> Option<&Stone> {
        self.offset(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Check if a cell is in range and unoccupied.
    pub fn is_vacant(&self, pos: &Position) -> bool {
        self.offset(pos).is_some_and(|i| self.cells[i].is_none())
    }

    /// Write a stone into its cell.
    pub fn place(&mut self, stone: Stone) -> Result<&Stone, GameError> {
        let index = self.offset(&stone.position).ok_or(GameError::BoardRange)?;
        let cell = &mut self.cells[index];
        if cell.is_some() {
            return Err(GameError::PositionOverlap);
        }
        Ok(&*cell.insert(stone))
    }

    /// Count unoccupied cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// All placed stones in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = &Stone> {
        self.cells.iter().flatten()
    }

    /// Nested `[x][y][z][w]` view of the cells.
    pub fn to_nested(&self) -> Vec<Vec<Vec<Vec<Option<&Stone>>>>> {
        if self.cells.is_empty() {
            return Vec::new();
        }
        let [_, sy, sz, sw] = self.shape;
        self.cells
            .chunks(sy * sz * sw)
            .map(|x| {
                x.chunks(sz * sw)
                    .map(|y| {
                        y.chunks(sw)
                            .map(|z| z.iter().map(Option::as_ref).collect())
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested().serialize(serializer)
    }
}
