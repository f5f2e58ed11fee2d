//! Text layout format for boards.
//!
//! One line per row with the highest `y` on the first line, so north is up:
//!
//! ```text
//! ..#
//! .D#
//! ...
//! ```
//!
//! `.` is empty, `#` a wall, `D` a destination. Blank lines are skipped.

use crate::board::{Board, EditOutcome};
use crate::content::{ContentFactory, ContentPool, ContentType};
use crate::error::{BoardError, LayoutError};
use crate::grid::{CellId, Direction};

/// Parsed layout: content types in row-major order, `y = 0` first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    cells: Vec<ContentType>,
}

impl Layout {
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let Some(&(_, first)) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut cells = vec![ContentType::Empty; width * height];
        for (row, &(line, text)) in rows.iter().enumerate() {
            let found = text.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    line,
                    expected: width,
                    found,
                });
            }
            let y = height - 1 - row;
            for (x, symbol) in text.chars().enumerate() {
                let kind = ContentType::from_symbol(symbol).ok_or(LayoutError::UnknownSymbol {
                    symbol,
                    line,
                    column: x + 1,
                })?;
                cells[x + y * width] = kind;
            }
        }

        Ok(Layout {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Content at (x, y), `None` outside the layout
    pub fn content_at(&self, x: usize, y: usize) -> Option<ContentType> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[x + y * self.width])
    }

    fn cells_of(&self, kind: ContentType) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == kind)
            .map(|(i, _)| i)
    }
}

/// Cells whose edit did not take while applying a layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub rejected: Vec<(i32, i32)>,
}

impl LayoutReport {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    fn note(&mut self, at: (i32, i32), outcome: EditOutcome) {
        if outcome == EditOutcome::Rejected {
            self.rejected.push(at);
        }
    }
}

fn arrow(direction: Direction) -> char {
    match direction {
        Direction::North => '^',
        Direction::South => 'v',
        Direction::East => '>',
        Direction::West => '<',
    }
}

impl Board<ContentPool> {
    /// Fresh board of the layout's size with the layout applied
    pub fn from_layout(layout: &Layout) -> Result<(Self, LayoutReport), BoardError> {
        let mut board = Board::new(layout.width, layout.height)?;
        let report = board.apply_layout(layout)?;
        Ok((board, report))
    }
}

impl<F: ContentFactory> Board<F> {
    /// Bring the board to `layout` through the validated toggles.
    ///
    /// Destinations are added first and stale ones removed, then stale walls
    /// are cleared and new walls placed. Any toggle the board rejects is
    /// listed in the report and leaves that cell as it was.
    pub fn apply_layout(&mut self, layout: &Layout) -> Result<LayoutReport, BoardError> {
        if (layout.width, layout.height) != (self.width(), self.height()) {
            return Err(BoardError::SizeMismatch {
                expected: (self.width(), self.height()),
                found: (layout.width, layout.height),
            });
        }

        let mut report = LayoutReport::default();

        for i in layout.cells_of(ContentType::Destination) {
            let cell = CellId(i);
            if self.content(cell) == ContentType::Wall {
                let outcome = self.toggle_wall(cell);
                report.note(self.grid().coords(cell), outcome);
            }
            if self.content(cell) == ContentType::Empty {
                let outcome = self.toggle_destination(cell);
                report.note(self.grid().coords(cell), outcome);
            }
        }

        let stale: Vec<CellId> = self
            .grid()
            .cells()
            .filter(|&cell| {
                let current = self.content(cell);
                current != ContentType::Empty && current != layout.cells[cell.0]
            })
            .collect();
        for &cell in &stale {
            if self.content(cell) == ContentType::Destination {
                let outcome = self.toggle_destination(cell);
                report.note(self.grid().coords(cell), outcome);
            }
        }
        for &cell in &stale {
            if self.content(cell) == ContentType::Wall {
                let outcome = self.toggle_wall(cell);
                report.note(self.grid().coords(cell), outcome);
            }
        }

        for i in layout.cells_of(ContentType::Wall) {
            let cell = CellId(i);
            if self.content(cell) == ContentType::Empty {
                let outcome = self.toggle_wall(cell);
                report.note(self.grid().coords(cell), outcome);
            }
        }

        Ok(report)
    }

    /// Content symbols, in the layout format
    pub fn layout_string(&self) -> String {
        self.render(|board, cell| board.content(cell).symbol())
    }

    /// Destinations, walls, and an arrow towards the next hop everywhere else
    pub fn path_string(&self) -> String {
        self.render(|board, cell| match board.content(cell) {
            ContentType::Empty => board.next_direction(cell).map_or('?', arrow),
            kind => kind.symbol(),
        })
    }

    fn render(&self, symbol: impl Fn(&Self, CellId) -> char) -> String {
        let mut result = String::with_capacity((self.width() + 1) * self.height());
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                result.push(symbol(self, CellId(x + y * self.width())));
            }
            result.push('\n');
        }
        result
    }
}
