//! Path engine: per-cell content, breadth-first paths towards the nearest
//! destination, and edits that are reverted when they would cut any cell off.

use crate::content::{ContentFactory, ContentPool, ContentType, TileContent};
use crate::error::{BoardError, PathError};
use crate::grid::{CellId, Direction, Grid};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, trace, warn};

/// Distance of a cell no search has reached
const UNREACHED: u32 = u32::MAX;

/// What a toggle did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    /// The edit kept every cell connected and took effect.
    Accepted,
    /// The edit would have disconnected a cell and was reverted.
    Rejected,
    /// The cell's content does not take part in this toggle.
    Ignored,
}

impl EditOutcome {
    pub fn is_accepted(self) -> bool {
        self == EditOutcome::Accepted
    }
}

/// A grid of cells whose paths always lead to a destination.
///
/// Every cell holds a content handle from the factory `F`. After any
/// toggle returns, each cell has a finite distance and a next-hop chain
/// ending at a destination.
pub struct Board<F: ContentFactory = ContentPool> {
    grid: Grid,
    factory: F,
    contents: Vec<F::Content>,
    distances: Vec<u32>,
    next_hops: Vec<Option<CellId>>,
    frontier: VecDeque<CellId>,
    revision: u64,
}

impl Board<ContentPool> {
    /// Board backed by a fresh [`ContentPool`]
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Self::initialize(width, height, ContentPool::new())
    }
}

impl<F: ContentFactory> Board<F> {
    /// Build the grid, fill it with empty content and seed a destination
    /// at the center cell.
    pub fn initialize(width: usize, height: usize, mut factory: F) -> Result<Self, BoardError> {
        let grid = Grid::new(width, height)?;
        let count = grid.cell_count();
        let contents = (0..count)
            .map(|_| factory.get(ContentType::Empty))
            .collect();

        let mut board = Board {
            grid,
            factory,
            contents,
            distances: vec![UNREACHED; count],
            next_hops: vec![None; count],
            frontier: VecDeque::with_capacity(count),
            revision: 0,
        };

        let center = board.grid.center();
        board.set_content(center, ContentType::Destination);
        let seeded = board.recompute_paths();
        debug_assert!(seeded.is_ok(), "an open grid with a destination is connected");

        let (x, y) = board.grid.coords(center);
        info!(width, height, x, y, "board initialized");
        Ok(board)
    }

    /// Recompute distances and next hops with a breadth-first search
    /// seeded from every destination at once.
    ///
    /// Walls are given a distance when first touched but the search does
    /// not continue through them. Fails when there is no destination or
    /// when any cell, walls included, is left unreached. Does not undo
    /// anything on failure.
    pub fn recompute_paths(&mut self) -> Result<(), PathError> {
        self.frontier.clear();
        for i in 0..self.contents.len() {
            self.next_hops[i] = None;
            if self.contents[i].content_type() == ContentType::Destination {
                self.distances[i] = 0;
                self.frontier.push_back(CellId(i));
            } else {
                self.distances[i] = UNREACHED;
            }
        }

        if self.frontier.is_empty() {
            return Err(PathError::NoDestinations);
        }

        while let Some(cell) = self.frontier.pop_front() {
            let next_distance = self.distances[cell.0] + 1;
            for dir in self.grid.expansion_order(cell) {
                let Some(neighbor) = self.grid.neighbor(cell, dir) else {
                    continue;
                };
                if self.distances[neighbor.0] != UNREACHED {
                    continue;
                }

                self.distances[neighbor.0] = next_distance;
                self.next_hops[neighbor.0] = Some(cell);
                if self.contents[neighbor.0].content_type() != ContentType::Wall {
                    self.frontier.push_back(neighbor);
                }
            }
        }

        let unreachable = self.distances.iter().filter(|&&d| d == UNREACHED).count();
        if unreachable > 0 {
            return Err(PathError::Disconnected { unreachable });
        }

        trace!(cells = self.contents.len(), "paths recomputed");
        Ok(())
    }

    /// Turn an empty cell into a destination or a destination back into an
    /// empty cell. Removing the only destination is rejected. Walls are
    /// ignored.
    pub fn toggle_destination(&mut self, cell: CellId) -> EditOutcome {
        if !self.owns(cell) {
            return EditOutcome::Ignored;
        }
        match self.content(cell) {
            ContentType::Destination => {
                self.apply_edit(cell, ContentType::Destination, ContentType::Empty)
            }
            ContentType::Empty => {
                self.apply_edit(cell, ContentType::Empty, ContentType::Destination)
            }
            ContentType::Wall => EditOutcome::Ignored,
        }
    }

    /// Turn an empty cell into a wall or a wall back into an empty cell.
    /// A wall that would leave any cell without a path is rejected.
    /// Destinations are ignored.
    pub fn toggle_wall(&mut self, cell: CellId) -> EditOutcome {
        if !self.owns(cell) {
            return EditOutcome::Ignored;
        }
        match self.content(cell) {
            ContentType::Wall => self.apply_edit(cell, ContentType::Wall, ContentType::Empty),
            ContentType::Empty => self.apply_edit(cell, ContentType::Empty, ContentType::Wall),
            ContentType::Destination => EditOutcome::Ignored,
        }
    }

    /// Ids from another, larger board are not ours to edit
    fn owns(&self, cell: CellId) -> bool {
        if self.grid.contains(cell) {
            return true;
        }
        debug!(
            index = cell.index(),
            cells = self.grid.cell_count(),
            "edit on foreign cell ignored"
        );
        false
    }

    /// Set `cell` to `kind`, putting `previous` back if the paths break
    fn apply_edit(&mut self, cell: CellId, previous: ContentType, kind: ContentType) -> EditOutcome {
        self.set_content(cell, kind);
        let Err(err) = self.recompute_paths() else {
            self.revision += 1;
            return EditOutcome::Accepted;
        };

        let (x, y) = self.grid.coords(cell);
        debug!(x, y, from = ?previous, to = ?kind, %err, "edit rejected");

        self.set_content(cell, previous);
        if let Err(err) = self.recompute_paths() {
            warn!(%err, "paths still broken after reverting edit");
        }
        EditOutcome::Rejected
    }

    fn set_content(&mut self, cell: CellId, kind: ContentType) {
        let fresh = self.factory.get(kind);
        let old = std::mem::replace(&mut self.contents[cell.0], fresh);
        self.factory.release(old);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Number of accepted edits since initialization
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Resolve (x, y) to a cell of this board
    pub fn get_cell(&self, x: i32, y: i32) -> Result<CellId, BoardError> {
        self.grid.get_cell(x, y)
    }

    pub fn content(&self, cell: CellId) -> ContentType {
        self.contents[cell.0].content_type()
    }

    /// Hop count to the nearest destination, `None` if unreached
    pub fn distance(&self, cell: CellId) -> Option<u32> {
        match self.distances[cell.0] {
            UNREACHED => None,
            distance => Some(distance),
        }
    }

    pub fn has_path(&self, cell: CellId) -> bool {
        self.distances[cell.0] != UNREACHED
    }

    /// The neighbor one step closer to a destination
    pub fn next_hop(&self, cell: CellId) -> Option<CellId> {
        self.next_hops[cell.0]
    }

    /// Which neighbor slot the next hop sits in
    pub fn next_direction(&self, cell: CellId) -> Option<Direction> {
        self.next_hop(cell)
            .and_then(|next| self.grid.direction_to(cell, next))
    }

    pub fn destinations(&self) -> impl Iterator<Item = CellId> + '_ {
        self.grid
            .cells()
            .filter(|&cell| self.content(cell) == ContentType::Destination)
    }

    pub fn destination_count(&self) -> usize {
        self.destinations().count()
    }

    /// Cells visited when following next hops from `cell`, starting with
    /// `cell` itself and ending at a destination. `None` if `cell` has no path.
    pub fn path_from(&self, cell: CellId) -> Option<Vec<CellId>> {
        if !self.has_path(cell) {
            return None;
        }
        let mut path = vec![cell];
        let mut current = cell;
        while let Some(next) = self.next_hop(current) {
            // A chain longer than the grid would be a cycle
            if path.len() > self.grid.cell_count() {
                return None;
            }
            path.push(next);
            current = next;
        }
        Some(path)
    }
}
