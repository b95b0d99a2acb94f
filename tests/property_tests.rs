//! Property tests over random boards and hands.

use proptest::prelude::*;

use connect_mana::cards::{CardCatalog, EffectCard};
use connect_mana::core::{Block, Board, Mark, Side};
use connect_mana::eval::{center_bonus, evaluate_cell, HeuristicConfig, INVALID_TOTAL};
use connect_mana::policy::{MoveRequest, MoveSelector};
use connect_mana::rules::{apply_move, find_completed_run};

fn mark() -> impl Strategy<Value = Mark> {
    prop_oneof![
        2 => Just(Mark::Empty),
        1 => Just(Mark::Player),
        1 => Just(Mark::Opponent),
    ]
}

fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        6 => Just(Block::Unblocked),
        1 => Just(Block::By(Side::Player)),
        1 => Just(Block::By(Side::Opponent)),
    ]
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Player), Just(Side::Opponent)]
}

fn board() -> impl Strategy<Value = Board> {
    (3usize..=7)
        .prop_flat_map(|size| (Just(size), 2..=size))
        .prop_flat_map(|(size, win)| {
            let cells = size * size;
            (
                Just(size),
                Just(win),
                prop::collection::vec(mark(), cells),
                prop::collection::vec(block(), cells),
            )
        })
        .prop_map(|(size, win, marks, blocked)| {
            Board::from_parts(size, win, marks, blocked).expect("generated board is well formed")
        })
}

fn hand() -> impl Strategy<Value = Vec<EffectCard>> {
    let cards: Vec<EffectCard> = CardCatalog::standard().iter().cloned().collect();
    prop::collection::vec(prop::sample::select(cards), 0..6)
}

proptest! {
    /// Arbitrary inputs never panic, and any run found is genuine.
    #[test]
    fn prop_run_detection_is_total(
        marks in prop::collection::vec(mark(), 0..64),
        size in 0usize..9,
        win in 0usize..10,
    ) {
        if let Some(run) = find_completed_run(&marks, size, win) {
            prop_assert_eq!(run.len(), win);
            let first = marks[run[0]];
            prop_assert!(!first.is_empty());
            prop_assert!(run.iter().all(|&c| marks[c] == first));
        }
    }

    /// Occupied cells and cells blocked against the side always score as
    /// invalid; every other cell scores as valid.
    #[test]
    fn prop_unplaceable_cells_are_invalid(board in board(), side in side()) {
        let config = HeuristicConfig::default();
        for cell in (0..board.cell_count()).filter(|&c| board.can_place(c, side)) {
            prop_assert!(evaluate_cell(&board, cell, side, &config).is_valid());
        }
        for cell in (0..board.cell_count()).filter(|&c| !board.can_place(c, side)) {
            let score = evaluate_cell(&board, cell, side, &config);
            prop_assert_eq!(score.total, INVALID_TOTAL);
            prop_assert!(!score.is_valid());
        }
    }

    /// The centre bonus never grows with distance from the centre.
    #[test]
    fn prop_center_bonus_non_increasing(size in 1usize..12, weight in 0i64..10) {
        let board = Board::new(size, 1).unwrap();
        let mut cells: Vec<usize> = (0..board.cell_count()).collect();
        cells.sort_by_key(|&c| board.center_distance(c));
        for pair in cells.windows(2) {
            prop_assert!(center_bonus(&board, pair[0], weight) >= center_bonus(&board, pair[1], weight));
        }
    }

    /// Selection is repeatable and always proposes a legal, affordable move.
    #[test]
    fn prop_selected_moves_apply(
        board in board(),
        hand in hand(),
        side in side(),
        mana in 0u32..=10,
    ) {
        let selector = MoveSelector::default();
        let request = MoveRequest::new(&board, side, &hand, mana);
        let chosen = selector.select_move(&request);
        prop_assert_eq!(&chosen, &selector.select_move(&request));

        if let Some(candidate) = chosen {
            let card = match candidate.card {
                Some(choice) => {
                    let card = &hand[choice.slot];
                    prop_assert_eq!(card.id, choice.id);
                    prop_assert!(card.cost <= mana);
                    Some(card)
                }
                None => None,
            };

            let mut after = board.clone();
            let applied = apply_move(&mut after, side, &candidate, card);
            prop_assert!(applied.is_ok(), "{:?} rejected: {:?}", candidate, applied);
        }
    }
}
