#![allow(dead_code)]

use pathboard::{Board, CellId, ContentType, Layout};
use std::collections::HashSet;

/// Build a board from layout text, failing the test if any edit is rejected
pub fn board_from(text: &str) -> Board {
    let layout = Layout::parse(text).expect("test layout should parse");
    let (board, report) = Board::from_layout(&layout).expect("board should build");
    assert!(
        report.is_complete(),
        "layout edits rejected at {:?}",
        report.rejected
    );
    board
}

pub fn cell(board: &Board, x: i32, y: i32) -> CellId {
    board.get_cell(x, y).expect("cell should be on the board")
}

/// Everything a presentation layer reads from each cell
pub type Snapshot = Vec<(ContentType, Option<u32>, Option<CellId>)>;

pub fn snapshot(board: &Board) -> Snapshot {
    board
        .grid()
        .cells()
        .map(|c| (board.content(c), board.distance(c), board.next_hop(c)))
        .collect()
}

pub fn distances(board: &Board) -> Vec<Option<u32>> {
    board.grid().cells().map(|c| board.distance(c)).collect()
}

/// Check that every cell has a distance and every non-wall cell follows
/// its next hops to a destination without revisiting a cell.
pub fn assert_paths_valid(board: &Board) {
    let grid = board.grid();
    assert!(board.destination_count() > 0, "board has no destination");

    for c in grid.cells() {
        let distance = board
            .distance(c)
            .unwrap_or_else(|| panic!("cell {:?} is unreachable", grid.coords(c)));

        match board.next_hop(c) {
            None => {
                assert_eq!(board.content(c), ContentType::Destination);
                assert_eq!(distance, 0);
            }
            Some(next) => {
                assert!(grid.direction_to(c, next).is_some(), "next hop is not adjacent");
                assert_ne!(board.content(next), ContentType::Wall, "path runs through a wall");
                assert_eq!(board.distance(next), Some(distance - 1));
            }
        }

        if board.content(c) == ContentType::Wall {
            continue;
        }
        let path = board.path_from(c).expect("non-wall cell has a path");
        assert!(path.len() <= grid.cell_count());
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len(), "path revisits a cell");
        let end = *path.last().expect("path is never empty");
        assert_eq!(board.content(end), ContentType::Destination);
    }
}

/// Mirror layout text left to right
pub fn flip_horizontal(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().rev().collect::<String>() + "\n")
        .collect()
}

/// Mirror layout text top to bottom
pub fn flip_vertical(text: &str) -> String {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    rows.iter().rev().map(|line| format!("{line}\n")).collect()
}
