//! Stateless legality checks shared by both game variants.

use crate::card::{Card, Color, Rank, Suit};

/// Number of foundation piles, one per suit in progress.
pub const FOUNDATIONS: usize = 4;

/// Red for diamonds and hearts, black for spades and clubs.
pub fn suit_color(suit: Suit) -> Color {
    match suit {
        Suit::Diamonds | Suit::Hearts => Color::Red,
        Suit::Spades | Suit::Clubs => Color::Black,
    }
}

/// Position of `b` minus position of `a` in the order `A, 2 .. 10, J, Q, K`.
///
/// `1` means `b` is one rank above `a`; `-1` means `a` directly follows `b`.
pub fn rank_diff(a: Rank, b: Rank) -> i8 {
    b.position() as i8 - a.position() as i8
}

/// Index of the foundation pile `card` may be appended to, if any.
///
/// An Ace goes to the first empty pile; any other card goes on the pile whose
/// top is the same suit and exactly one rank below it.
pub fn find_foundation_slot(foundations: &[Vec<Card>], card: &Card) -> Option<usize> {
    foundations.iter().position(|pile| match pile.last() {
        None => card.rank == Rank::Ace,
        Some(top) => top.suit == card.suit && rank_diff(card.rank, top.rank) == -1,
    })
}

/// True once every foundation holds a full suit.
pub fn foundations_complete(foundations: &[Vec<Card>]) -> bool {
    foundations.iter().all(|pile| pile.len() == Rank::ALL.len())
}

/// Tableau placement rules. The variants differ only in what an empty
/// column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub any_rank_on_empty: bool,
}

impl Rules {
    /// Only a King may open an empty column.
    pub const KLONDIKE: Rules = Rules {
        any_rank_on_empty: false,
    };

    /// Any card may open an empty column.
    pub const FREECELL: Rules = Rules {
        any_rank_on_empty: true,
    };

    /// Can `source` be placed directly on `target` (or on an empty column when
    /// `target` is `None`)?
    ///
    /// The empty-column check looks at rank only, not at the face of the card.
    pub fn is_valid_tableau_placement(&self, source: &Card, target: Option<&Card>) -> bool {
        match target {
            None => self.any_rank_on_empty || source.rank == Rank::King,
            Some(target) => {
                source.face_up
                    && target.face_up
                    && rank_diff(source.rank, target.rank) == 1
                    && source.color() != target.color()
            }
        }
    }

    /// Do `cards` (bottom to top) form a descending run of alternating colors?
    pub fn is_valid_run(&self, cards: &[Card]) -> bool {
        cards
            .windows(2)
            .all(|pair| self.is_valid_tableau_placement(&pair[1], Some(&pair[0])))
    }
}
