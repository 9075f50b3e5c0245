//! Klondike and Freecell solitaire: the rule engine plus a small text front end.

pub mod card;
pub mod command;
pub mod error;
pub mod freecell;
pub mod klondike;
pub mod logging;
pub mod renderer;
pub mod rules;
pub mod session;

pub use card::{Card, Color, Deck, Rank, Suit};
pub use error::MoveError;
pub use freecell::FreecellGame;
pub use klondike::KlondikeGame;
pub use rules::Rules;
pub use session::{Session, Table, Variant};
