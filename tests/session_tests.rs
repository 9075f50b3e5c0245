use std::io::Cursor;

use termsol::renderer::Renderer;
use termsol::{Session, Table, Variant};

#[derive(Default)]
struct Recorder {
    renders: usize,
    infos: Vec<String>,
    errors: Vec<String>,
    helps: Vec<Variant>,
    wins: usize,
}

impl Renderer for Recorder {
    fn render(&mut self, _table: &Table) {
        self.renders += 1;
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn help(&mut self, variant: Variant) {
        self.helps.push(variant);
    }

    fn win(&mut self) {
        self.wins += 1;
    }
}

#[test]
fn klondike_session_dispatches_commands() {
    let mut session = Session::new(Table::deal(Variant::Klondike, Some(5)), Recorder::default());
    session
        .run_with(Cursor::new("d\nwc 9\nbogus\nhelp\nquit\nd\n"))
        .unwrap();

    let Table::Klondike(game) = session.table() else {
        panic!("expected Klondike");
    };
    assert_eq!(game.stock.len(), 23);
    assert_eq!(game.waste.len(), 1);

    let rec = session.renderer();
    assert_eq!(rec.errors.len(), 2);
    assert_eq!(rec.helps, vec![Variant::Klondike]);
    assert_eq!(rec.infos.last().map(String::as_str), Some("Thanks for playing. Goodbye!"));
    // Initial render plus one per accepted command before quit.
    assert_eq!(rec.renders, 3);
    assert_eq!(rec.wins, 0);
}

#[test]
fn freecell_session_refuses_klondike_commands() {
    let mut session = Session::new(Table::deal(Variant::Freecell, Some(5)), Recorder::default());
    session.run_with(Cursor::new("d\nwf\n")).unwrap();
    let rec = session.renderer();
    assert_eq!(rec.errors.len(), 2);
    assert!(rec.errors.iter().all(|e| e.contains("Freecell")));
}

#[test]
fn new_game_replaces_the_table() {
    let mut session = Session::new(Table::deal(Variant::Klondike, Some(5)), Recorder::default());
    session.run_with(Cursor::new("d\nd\nnew\n")).unwrap();
    let Table::Klondike(game) = session.table() else {
        panic!("expected Klondike");
    };
    assert!(game.waste.is_empty());
    assert_eq!(game.stock.len(), 24);
}

#[test]
fn winning_move_shows_the_banner() {
    let mut table = Table::deal(Variant::Klondike, Some(5));
    if let Table::Klondike(game) = &mut table {
        game.reset_to_almost_won();
    }
    let mut session = Session::new(table, Recorder::default());
    session.run_with(Cursor::new("wf\n")).unwrap();
    assert!(session.table().won());
    assert_eq!(session.renderer().wins, 1);
}

#[test]
fn refused_move_reports_its_reason() {
    let mut session = Session::new(Table::deal(Variant::Klondike, Some(5)), Recorder::default());
    session.run_with(Cursor::new("wf\ncc 1:3 2\n")).unwrap();
    let rec = session.renderer();
    assert_eq!(rec.errors[0], "Invalid move: Waste is empty");
    assert!(rec.errors[1].contains("Klondike"));
}
