pub mod action_log;
pub mod board;
pub mod config;
pub mod content;
pub mod error;
pub mod grid;
pub mod layout;

pub use board::{Board, EditOutcome};
pub use content::{ContentFactory, ContentPool, ContentType, PooledContent, TileContent};
pub use error::{BoardError, LayoutError, PathError};
pub use grid::{CellId, Direction, Grid};
pub use layout::{Layout, LayoutReport};
