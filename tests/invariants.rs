use std::collections::HashSet;

use proptest::prelude::*;
use termsol::command::Command;
use termsol::session::apply;
use termsol::{Card, Rank, Suit, Table, Variant};

type Snapshot = Vec<Vec<(Rank, Suit, bool)>>;

fn piles(table: &Table) -> Vec<Vec<Card>> {
    match table {
        Table::Klondike(game) => {
            let mut piles = vec![game.stock.clone(), game.waste.clone()];
            piles.extend(game.tableau.iter().cloned());
            piles.extend(game.foundations.iter().cloned());
            piles
        }
        Table::Freecell(game) => {
            let mut piles = vec![game.freecells.iter().flatten().copied().collect()];
            piles.extend(game.tableau.iter().cloned());
            piles.extend(game.foundations.iter().cloned());
            piles
        }
    }
}

fn snapshot(table: &Table) -> Snapshot {
    piles(table)
        .iter()
        .map(|pile| pile.iter().map(|c| (c.rank, c.suit, c.face_up)).collect())
        .collect()
}

fn foundations(table: &Table) -> Vec<Vec<Card>> {
    match table {
        Table::Klondike(game) => game.foundations.to_vec(),
        Table::Freecell(game) => game.foundations.to_vec(),
    }
}

fn assert_invariants(table: &Table) {
    let cards: Vec<Card> = piles(table).into_iter().flatten().collect();
    assert_eq!(cards.len(), 52);
    let unique: HashSet<Card> = cards.into_iter().collect();
    assert_eq!(unique.len(), 52);

    for pile in foundations(table) {
        if let Some(first) = pile.first() {
            assert!(pile.iter().all(|c| c.suit == first.suit));
        }
        let ranks: Vec<Rank> = pile.iter().map(|c| c.rank).collect();
        assert_eq!(ranks[..], Rank::ALL[..ranks.len()]);
    }
}

fn klondike_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => Just(Command::Draw),
        1 => Just(Command::WasteToFoundation),
        2 => (0..7usize).prop_map(|dst| Command::WasteToColumn { dst }),
        3 => (0..7usize, 0..7usize).prop_map(|(src, dst)| Command::ColumnToColumn { src, count: 1, dst }),
        2 => (0..7usize).prop_map(|src| Command::ColumnToFoundation { src }),
        2 => (0..7usize).prop_map(|col| Command::Flip { col }),
    ]
}

fn freecell_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => (0..8usize, 1..5usize, 0..8usize)
            .prop_map(|(src, count, dst)| Command::ColumnToColumn { src, count, dst }),
        2 => (0..8usize).prop_map(|src| Command::ColumnToFreeCell { src }),
        2 => (0..4usize, 0..8usize).prop_map(|(cell, dst)| Command::FreeCellToColumn { cell, dst }),
        2 => (0..8usize).prop_map(|src| Command::ColumnToFoundation { src }),
        1 => (0..4usize).prop_map(|cell| Command::FreeCellToFoundation { cell }),
    ]
}

fn play(mut table: Table, commands: &[Command]) {
    assert_invariants(&table);
    for cmd in commands {
        let before = snapshot(&table);
        if apply(&mut table, cmd).is_err() {
            assert_eq!(snapshot(&table), before, "refused {:?} changed the table", cmd);
        }
        assert_invariants(&table);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn klondike_commands_preserve_the_deck(
        seed in any::<u64>(),
        commands in prop::collection::vec(klondike_command(), 0..200),
    ) {
        play(Table::deal(Variant::Klondike, Some(seed)), &commands);
    }

    #[test]
    fn freecell_commands_preserve_the_deck(
        seed in any::<u64>(),
        commands in prop::collection::vec(freecell_command(), 0..200),
    ) {
        play(Table::deal(Variant::Freecell, Some(seed)), &commands);
    }

    #[test]
    fn deal_and_restore_keep_stock_and_waste(seed in any::<u64>(), deals in 0..80usize) {
        let mut table = Table::deal(Variant::Klondike, Some(seed));
        let Table::Klondike(game) = &mut table else { unreachable!() };
        let pool: HashSet<Card> = game.stock.iter().copied().collect();
        for _ in 0..deals {
            if game.deal_from_stock().is_err() {
                game.restore_stock();
            }
        }
        let waste_len = game.waste.len();
        let stock_len = game.stock.len();
        game.restore_stock();
        prop_assert!(game.waste.is_empty());
        prop_assert_eq!(game.stock.len(), stock_len + waste_len);
        prop_assert!(game.stock.iter().all(|c| !c.face_up));
        let after: HashSet<Card> = game.stock.iter().copied().collect();
        prop_assert_eq!(after, pool);
    }
}
