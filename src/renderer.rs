use crossterm::style::Stylize;

use crate::card::{Card, Color};
use crate::freecell::FreecellGame;
use crate::klondike::KlondikeGame;
use crate::session::{Table, Variant};

/// Trait that abstracts the rendering layer. The engine only hands it plain
/// piles of cards to draw.
pub trait Renderer {
    /// Render the full table.
    fn render(&mut self, table: &Table);
    /// Display an informational message.
    fn info(&mut self, msg: &str);
    /// Display an error message.
    fn error(&mut self, msg: &str);
    /// Display the help text for a variant.
    fn help(&mut self, variant: Variant);
    /// Display the win screen.
    fn win(&mut self);
}

// ---------------------------------------------------------------------------
// CLI Renderer
// ---------------------------------------------------------------------------

/// A simple colored CLI renderer.
#[derive(Debug, Default)]
pub struct CliRenderer;

impl CliRenderer {
    pub fn new() -> Self {
        CliRenderer
    }

    fn card_str(&self, card: &Card) -> String {
        if !card.face_up {
            return "[###]".dark_blue().to_string();
        }
        let label = format!("[{:>3}]", card.label());
        match card.color() {
            Color::Red => label.red().to_string(),
            Color::Black => label.white().to_string(),
        }
    }

    fn pile_top_str(&self, pile: &[Card]) -> String {
        match pile.last() {
            Some(card) => self.card_str(card),
            None => "[   ]".to_string(),
        }
    }

    fn foundations_str(&self, foundations: &[Vec<Card>]) -> String {
        foundations
            .iter()
            .map(|pile| self.pile_top_str(pile))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_columns(&self, columns: &[Vec<Card>]) {
        println!();
        print!("  COL: ");
        for i in 0..columns.len() {
            print!(" {:^5}", i);
        }
        println!();

        let max_len = columns.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..max_len {
            print!("  {:>3}: ", row);
            for col in columns {
                match col.get(row) {
                    Some(card) => print!(" {}", self.card_str(card)),
                    None => print!("   .. "),
                }
            }
            println!();
        }

        if max_len == 0 {
            println!("  (all columns empty)");
        }
        println!();
    }

    fn render_klondike(&self, game: &KlondikeGame) {
        let stock = if game.stock.is_empty() {
            "[   ]".to_string()
        } else {
            "[###]".dark_blue().to_string()
        };
        println!(
            "  STOCK: {} {:>2}   WASTE: {}   FOUND: {}",
            stock,
            game.stock.len(),
            self.pile_top_str(&game.waste),
            self.foundations_str(&game.foundations)
        );
        self.render_columns(&game.tableau);
    }

    fn render_freecell(&self, game: &FreecellGame) {
        print!("  FREE CELLS: ");
        for (i, cell) in game.freecells.iter().enumerate() {
            match cell {
                Some(card) => print!("{}:{} ", i, self.card_str(card)),
                None => print!("{}:[   ] ", i),
            }
        }
        println!("  FOUND: {}", self.foundations_str(&game.foundations));
        self.render_columns(&game.tableau);
    }
}

impl Renderer for CliRenderer {
    fn render(&mut self, table: &Table) {
        println!();
        match table {
            Table::Klondike(game) => self.render_klondike(game),
            Table::Freecell(game) => self.render_freecell(game),
        }
    }

    fn info(&mut self, msg: &str) {
        println!("{} {}", "[INFO]".cyan(), msg);
    }

    fn error(&mut self, msg: &str) {
        println!("{} {}", "[ERR ]".red(), msg);
    }

    fn help(&mut self, variant: Variant) {
        match variant {
            Variant::Klondike => println!(
                r#"
  KLONDIKE
    Build the foundations up by suit from Ace to King. On the columns,
    place a card on one a rank higher and of the other color. Only a
    King may fill an empty column.

    d | draw          Deal a card from the stock (restores it when empty)
    wc  <col>         Waste → column
    wf                Waste → foundation
    cc  <src> <dst>   Move the pile that fits from column to column
    ctf <col>         Column top → foundation
    flip <col>        Turn over a face-down top card
    new | quit | help
"#
            ),
            Variant::Freecell => println!(
                r#"
  FREECELL
    Build the foundations up by suit from Ace to King. On the columns,
    place a card on one a rank higher and of the other color. Any card
    may fill an empty column. Each free cell holds a single card.

    cc  <src> <dst>     Move the top card column → column
    cc  <src>:<n> <dst> Move the top n cards as one unit
    cf  <col>           Column top → first empty free cell
    fc  <cell> <col>    Free cell → column
    ctf <col>           Column top → foundation
    ftf <cell>          Free cell → foundation
    new | quit | help
"#
            ),
        }
    }

    fn win(&mut self) {
        println!(
            "\n  {}  Type 'new' for another game.\n",
            "Congratulations! You solved it!".yellow().bold()
        );
    }
}
