use std::io::{self, BufRead, Write};

use clap::ValueEnum;
use log::{debug, info};

use crate::command::{Command, parse_command};
use crate::error::MoveError;
use crate::freecell::{FREECELL_COLUMNS, FreecellGame};
use crate::klondike::{KLONDIKE_COLUMNS, KlondikeGame};
use crate::renderer::Renderer;

/// Which solitaire is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    Klondike,
    Freecell,
}

impl Variant {
    pub fn columns(self) -> usize {
        match self {
            Variant::Klondike => KLONDIKE_COLUMNS,
            Variant::Freecell => FREECELL_COLUMNS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Klondike => "Klondike",
            Variant::Freecell => "Freecell",
        }
    }
}

/// The game currently on the table.
#[derive(Debug, Clone)]
pub enum Table {
    Klondike(KlondikeGame),
    Freecell(FreecellGame),
}

impl Table {
    /// Deal a new game, reproducibly when `seed` is given.
    pub fn deal(variant: Variant, seed: Option<u64>) -> Self {
        match (variant, seed) {
            (Variant::Klondike, Some(s)) => Table::Klondike(KlondikeGame::seeded(s)),
            (Variant::Klondike, None) => Table::Klondike(KlondikeGame::new()),
            (Variant::Freecell, Some(s)) => Table::Freecell(FreecellGame::seeded(s)),
            (Variant::Freecell, None) => Table::Freecell(FreecellGame::new()),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Table::Klondike(_) => Variant::Klondike,
            Table::Freecell(_) => Variant::Freecell,
        }
    }

    pub fn won(&self) -> bool {
        match self {
            Table::Klondike(game) => game.won(),
            Table::Freecell(game) => game.won(),
        }
    }
}

/// Apply a move command to `table`. Commands that do not move cards
/// (new game, help, quit) and commands the variant has no piles for are
/// refused without touching the table.
pub fn apply(table: &mut Table, cmd: &Command) -> Result<(), MoveError> {
    match (table, cmd) {
        (Table::Klondike(game), Command::Draw) => {
            game.draw();
            Ok(())
        }
        (Table::Klondike(game), Command::WasteToColumn { dst }) => {
            game.move_from_waste_to_tableau(*dst)
        }
        (Table::Klondike(game), Command::WasteToFoundation) => {
            game.move_to_foundation_from_waste()
        }
        (Table::Klondike(game), Command::ColumnToColumn { src, dst, .. }) => {
            game.move_tableau_pile(*src, *dst)
        }
        (Table::Klondike(game), Command::ColumnToFoundation { src }) => {
            game.move_to_foundation_from_tableau(*src)
        }
        (Table::Klondike(game), Command::Flip { col }) => game.reveal_top(*col),

        (Table::Freecell(game), Command::ColumnToColumn { src, count, dst }) => {
            game.move_tableau_cards(*src, *dst, *count)
        }
        (Table::Freecell(game), Command::ColumnToFoundation { src }) => {
            game.move_to_foundation(*src)
        }
        (Table::Freecell(game), Command::ColumnToFreeCell { src }) => game.move_to_freecell(*src),
        (Table::Freecell(game), Command::FreeCellToColumn { cell, dst }) => {
            game.move_from_freecell_to_tableau(*cell, *dst)
        }
        (Table::Freecell(game), Command::FreeCellToFoundation { cell }) => {
            game.move_from_freecell_to_foundation(*cell)
        }

        (Table::Klondike(_), _) => Err(MoveError::InvalidMove("Not available in Klondike")),
        (Table::Freecell(_), _) => Err(MoveError::InvalidMove("Not available in Freecell")),
    }
}

/// The interactive loop. `renderer` is injected so the engine stays
/// renderer-agnostic.
pub struct Session<R: Renderer> {
    table: Table,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub fn new(table: Table, renderer: R) -> Self {
        Session { table, renderer }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Play on standard input until the player quits.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock())
    }

    /// Play commands read line by line from `input` until quit or EOF.
    pub fn run_with<I: BufRead>(&mut self, mut input: I) -> io::Result<()> {
        let mut stdout = io::stdout();
        self.renderer.render(&self.table);

        loop {
            print!("> ");
            stdout.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            match parse_command(&line, self.table.variant()) {
                Err(e) => self.renderer.error(&e),
                Ok(cmd) => {
                    if self.handle(cmd) {
                        break;
                    }
                    if self.table.won() {
                        info!("{} won", self.table.variant().name());
                        self.renderer.win();
                    }
                    self.renderer.render(&self.table);
                }
            }
        }
        Ok(())
    }

    /// Dispatch a command. Returns `true` if the session should end.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => {
                self.renderer.info("Thanks for playing. Goodbye!");
                return true;
            }
            Command::Help => {
                self.renderer.help(self.table.variant());
            }
            Command::NewGame => {
                self.table = Table::deal(self.table.variant(), None);
                self.renderer.info("A new game has been dealt.");
            }
            cmd => {
                if let Err(e) = apply(&mut self.table, &cmd) {
                    debug!("Rejected {:?}: {}", cmd, e);
                    self.renderer.error(&e.to_string());
                }
            }
        }
        false
    }
}
