use crate::error::BoardError;

/// One of the four cardinal neighbor slots of a cell.
///
/// North points towards increasing `y`, East towards increasing `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit step `(dx, dy)` for this direction
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

/// Row-major index of a cell: `x + y * width`
///
/// Only a [`Grid`] hands these out; there is no public constructor and no
/// serde form. Resolve coordinates through [`Grid::get_cell`] instead.
///
/// ```compile_fail
/// let forged: pathboard::CellId = serde_json::from_str("1000").unwrap();
/// ```
///
/// ```compile_fail
/// let forged = pathboard::CellId(1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed cell topology: size, 4-way adjacency and checkerboard parity.
///
/// Built once and never resized. Neighbor links are stored as indices so
/// the cell graph has no owning cycles.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    neighbors: Vec<[Option<CellId>; 4]>,
    alternative: Vec<bool>,
}

impl Grid {
    /// Build a `width x height` grid with every neighbor link wired
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyGrid { width, height });
        }
        let too_large = BoardError::GridTooLarge { width, height };
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(too_large);
        }
        let count = width.checked_mul(height).ok_or(too_large.clone())?;
        // Hop counts are u32 and u32::MAX marks an unreached cell
        if u32::try_from(count).map_or(true, |count| count == u32::MAX) {
            return Err(too_large);
        }

        let mut neighbors = vec![[None; 4]; count];
        let mut alternative = Vec::with_capacity(count);

        let mut i = 0;
        for y in 0..height {
            for x in 0..width {
                if x > 0 {
                    Self::link(&mut neighbors, i, i - 1, Direction::West);
                }
                if y > 0 {
                    Self::link(&mut neighbors, i, i - width, Direction::South);
                }
                alternative.push((x % 2 == 0) ^ (y % 2 == 1));
                i += 1;
            }
        }

        Ok(Grid {
            width,
            height,
            neighbors,
            alternative,
        })
    }

    /// Make `other` the `dir` neighbor of `cell`, and `cell` the opposite neighbor of `other`
    fn link(neighbors: &mut [[Option<CellId>; 4]], cell: usize, other: usize, dir: Direction) {
        neighbors[cell][dir.slot()] = Some(CellId(other));
        neighbors[other][dir.opposite().slot()] = Some(CellId(cell));
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.neighbors.len()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cell_count()).map(CellId)
    }

    /// Look up the cell at (x, y)
    pub fn get_cell(&self, x: i32, y: i32) -> Result<CellId, BoardError> {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(ux), Ok(uy)) if ux < self.width && uy < self.height => {
                Ok(CellId(ux + uy * self.width))
            }
            _ => Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// Whether `cell` is one of this grid's cells
    pub fn contains(&self, cell: CellId) -> bool {
        cell.0 < self.cell_count()
    }

    /// Convert a cell to (x, y) coordinates
    pub fn coords(&self, cell: CellId) -> (i32, i32) {
        // Both fit in i32: checked in `new`
        ((cell.0 % self.width) as i32, (cell.0 / self.width) as i32)
    }

    /// The structural center, index `cell_count / 2`
    pub fn center(&self) -> CellId {
        CellId(self.cell_count() / 2)
    }

    pub fn neighbor(&self, cell: CellId, dir: Direction) -> Option<CellId> {
        self.neighbors[cell.0][dir.slot()]
    }

    /// Existing neighbors in North, South, East, West order
    pub fn neighbors(&self, cell: CellId) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(cell, dir).map(|n| (dir, n)))
    }

    /// Checkerboard parity: `(x even) XOR (y odd)`
    pub fn is_alternative(&self, cell: CellId) -> bool {
        self.alternative[cell.0]
    }

    /// Order in which a search expands the neighbors of `cell`.
    ///
    /// Alternating the order across the checkerboard makes ties between
    /// equally short paths break in zig-zags instead of long straight runs.
    pub fn expansion_order(&self, cell: CellId) -> [Direction; 4] {
        if self.is_alternative(cell) {
            [
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West,
            ]
        } else {
            [
                Direction::West,
                Direction::East,
                Direction::South,
                Direction::North,
            ]
        }
    }

    /// Which neighbor slot of `from` holds `to`, if they are adjacent
    pub fn direction_to(&self, from: CellId, to: CellId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.neighbor(from, dir) == Some(to))
    }
}
