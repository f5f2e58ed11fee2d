mod common;

use common::{assert_paths_valid, snapshot};
use pathboard::{Board, ContentType, EditOutcome};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Edit {
    Wall(i32, i32),
    Destination(i32, i32),
}

fn edits(max: i32) -> impl Strategy<Value = Vec<Edit>> {
    let edit = prop_oneof![
        3 => (0..max, 0..max).prop_map(|(x, y)| Edit::Wall(x, y)),
        1 => (0..max, 0..max).prop_map(|(x, y)| Edit::Destination(x, y)),
    ];
    prop::collection::vec(edit, 0..60)
}

proptest! {
    #[test]
    fn edits_keep_every_cell_connected(
        width in 1usize..8,
        height in 1usize..8,
        sequence in edits(8),
    ) {
        let mut board = Board::new(width, height).unwrap();
        let cell_count = (width * height) as u64;

        for edit in sequence {
            let (x, y, is_wall) = match edit {
                Edit::Wall(x, y) => (x, y, true),
                Edit::Destination(x, y) => (x, y, false),
            };
            let Ok(c) = board.get_cell(x, y) else {
                continue;
            };

            let before = snapshot(&board);
            let before_content = board.content(c);
            let revision = board.revision();

            let outcome = if is_wall {
                board.toggle_wall(c)
            } else {
                board.toggle_destination(c)
            };

            match outcome {
                EditOutcome::Accepted => {
                    prop_assert_ne!(board.content(c), before_content);
                    prop_assert_eq!(board.revision(), revision + 1);
                }
                EditOutcome::Rejected | EditOutcome::Ignored => {
                    prop_assert_eq!(snapshot(&board), before);
                    prop_assert_eq!(board.revision(), revision);
                }
            }
            if outcome == EditOutcome::Ignored {
                let other = if is_wall { ContentType::Destination } else { ContentType::Wall };
                prop_assert_eq!(before_content, other);
            }

            assert_paths_valid(&board);
            prop_assert_eq!(board.factory().live(), cell_count);
        }
    }

    #[test]
    fn wall_toggle_is_reversible(
        size in 2usize..7,
        sequence in edits(7),
        x in 0i32..7,
        y in 0i32..7,
    ) {
        let mut board = Board::new(size, size).unwrap();
        for edit in sequence {
            let (ex, ey) = match edit {
                Edit::Wall(x, y) | Edit::Destination(x, y) => (x, y),
            };
            if let Ok(c) = board.get_cell(ex, ey) {
                match edit {
                    Edit::Wall(..) => board.toggle_wall(c),
                    Edit::Destination(..) => board.toggle_destination(c),
                };
            }
        }

        let Ok(c) = board.get_cell(x, y) else {
            return Ok(());
        };
        let before = snapshot(&board);
        if board.toggle_wall(c).is_accepted() {
            prop_assert!(board.toggle_wall(c).is_accepted());
        }
        prop_assert_eq!(snapshot(&board), before);
    }
}
