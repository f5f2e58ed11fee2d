//! Error types for board construction, path computation and layouts.

use std::fmt;

/// Errors a caller of the board has to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// Attempted to build a grid with zero cells.
    EmptyGrid { width: usize, height: usize },
    /// The grid does not fit the coordinate or index types.
    GridTooLarge { width: usize, height: usize },
    /// A layout was applied to a board of a different size.
    SizeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "cell ({x}, {y}) is outside the {width}x{height} grid"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::GridTooLarge { width, height } => {
                write!(f, "grid of {width}x{height} cells is too large")
            }
            Self::SizeMismatch { expected, found } => write!(
                f,
                "layout is {}x{} but the board is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Why a path pass could not cover the whole grid.
///
/// Never escapes a toggle: the board reverts the edit that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// No destination cell exists to seed the search.
    NoDestinations,
    /// At least one cell was left without a path.
    Disconnected { unreachable: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDestinations => write!(f, "no destination cells"),
            Self::Disconnected { unreachable } => {
                write!(f, "{unreachable} cell(s) cannot reach a destination")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Errors from parsing the text layout format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The text contained no grid rows.
    Empty,
    /// A row is not as wide as the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a content symbol.
    UnknownSymbol { symbol: char, line: usize, column: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout has no rows"),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line} has {found} cells, expected {expected}"
            ),
            Self::UnknownSymbol {
                symbol,
                line,
                column,
            } => write!(f, "unknown symbol {symbol:?} at line {line}, column {column}"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_the_cell() {
        let err = BoardError::OutOfBounds {
            x: 5,
            y: -1,
            width: 3,
            height: 3,
        };
        assert_eq!(err.to_string(), "cell (5, -1) is outside the 3x3 grid");
    }

    #[test]
    fn size_mismatch_message_orders_layout_first() {
        let err = BoardError::SizeMismatch {
            expected: (4, 4),
            found: (2, 3),
        };
        assert_eq!(err.to_string(), "layout is 2x3 but the board is 4x4");
    }
}
