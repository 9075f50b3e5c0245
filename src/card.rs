use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// The four French suits, in canonical deck order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Diamonds,
    Clubs,
    Hearts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

    /// Glyph used when drawing a card.
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Hearts => "♥",
        }
    }

    pub fn color(self) -> Color {
        crate::rules::suit_color(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card ranks, Ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All thirteen ranks in canonical order `A, 2 .. 10, J, Q, K`.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Zero-based position in the canonical order.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card. Identity is the rank and suit; `face_up` is the only
/// state that changes during play and is ignored by equality and hashing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

impl Card {
    /// A face-down card.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_up: false,
        }
    }

    pub fn face_up(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_up: true,
        }
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn suit_symbol(&self) -> &'static str {
        self.suit.symbol()
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The 52 distinct cards, face-down, in suit-major order until shuffled.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }

        debug_assert_eq!(cards.len(), DECK_SIZE, "Deck must have exactly 52 cards");
        Deck { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn fresh_deck_holds_each_card_once_face_down() {
        let deck = Deck::new();
        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| !c.face_up));
    }

    #[test]
    fn shuffle_permutes_without_losing_cards() {
        let mut deck = Deck::new();
        deck.shuffle(&mut SmallRng::seed_from_u64(7));
        let shuffled: HashSet<Card> = deck.iter().copied().collect();
        let fresh: HashSet<Card> = Deck::new().iter().copied().collect();
        assert_eq!(shuffled, fresh);
        assert_ne!(deck.into_cards(), Deck::new().into_cards());
    }

    #[test]
    fn equality_ignores_face() {
        assert_eq!(
            Card::new(Rank::Queen, Suit::Hearts),
            Card::face_up(Rank::Queen, Suit::Hearts)
        );
        assert_ne!(
            Card::new(Rank::Queen, Suit::Hearts),
            Card::new(Rank::Queen, Suit::Diamonds)
        );
    }

    #[test]
    fn display_attributes() {
        let card = Card::face_up(Rank::Ten, Suit::Diamonds);
        assert_eq!(card.label(), "10♦");
        assert_eq!(card.suit_symbol(), "♦");
        assert_eq!(card.color(), Color::Red);
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).color(), Color::Black);
    }
}
