use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::card::{Card, DECK_SIZE, Deck, Rank};
use crate::error::MoveError;
use crate::rules::{FOUNDATIONS, Rules, find_foundation_slot, foundations_complete};

/// Number of tableau columns in Klondike.
pub const KLONDIKE_COLUMNS: usize = 7;

/// A game of Klondike. The piles are public so a front end can redraw them
/// after every command; they are only rearranged through the command methods.
///
/// In every pile the last element is the top card.
#[derive(Debug, Clone)]
pub struct KlondikeGame {
    /// Face-down draw pile.
    pub stock: Vec<Card>,
    /// Face-up cards dealt from the stock.
    pub waste: Vec<Card>,
    /// 7 tableau columns; index 0 is leftmost.
    pub tableau: [Vec<Card>; KLONDIKE_COLUMNS],
    /// 4 foundations, each built Ace to King in one suit.
    pub foundations: [Vec<Card>; FOUNDATIONS],
    rules: Rules,
}

impl KlondikeGame {
    // -------------------------------------------------------------------------
    // Construction / Dealing
    // -------------------------------------------------------------------------

    /// Deal a fresh shuffled game using a random seed.
    pub fn new() -> Self {
        let mut rng = SmallRng::from_os_rng();
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        Self::from_deck(deck)
    }

    /// Deal a game from a specific seed (useful for reproducible games).
    pub fn seeded(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        Self::from_deck(deck)
    }

    /// Deal from an already-ordered deck. Cards are taken from the end of the
    /// deck: column `n` receives `n + 1` cards with only its last one face-up,
    /// and the remaining 24 cards become the stock.
    pub fn from_deck(deck: Deck) -> Self {
        assert_eq!(deck.len(), DECK_SIZE, "Need exactly 52 cards to deal");

        let mut cards = deck.into_cards();
        let mut tableau: [Vec<Card>; KLONDIKE_COLUMNS] = Default::default();
        for (n, pile) in tableau.iter_mut().enumerate() {
            let mut dealt = cards.split_off(cards.len() - (n + 1));
            dealt.reverse();
            for card in dealt.iter_mut() {
                card.face_up = false;
            }
            if let Some(top) = dealt.last_mut() {
                top.face_up = true;
            }
            *pile = dealt;
        }
        for card in cards.iter_mut() {
            card.face_up = false;
        }

        info!("Dealt Klondike: {} cards in stock", cards.len());
        KlondikeGame {
            stock: cards,
            waste: Vec::new(),
            tableau,
            foundations: Default::default(),
            rules: Rules::KLONDIKE,
        }
    }

    /// Rearrange the table so a single move wins: three full foundations, the
    /// fourth missing its King, which is the only card in the waste.
    ///
    /// Exists for tests of the win condition.
    pub fn reset_to_almost_won(&mut self) {
        let mut cards = Deck::new().into_cards();
        for card in cards.iter_mut() {
            card.face_up = true;
        }
        let last = cards.split_off(DECK_SIZE - 1);
        let mut suits = cards.chunks(Rank::ALL.len());
        for pile in self.foundations.iter_mut() {
            *pile = suits.next().map(<[Card]>::to_vec).unwrap_or_default();
        }
        for pile in self.tableau.iter_mut() {
            pile.clear();
        }
        self.stock.clear();
        self.waste = last;
    }

    // -------------------------------------------------------------------------
    // Stock / Waste
    // -------------------------------------------------------------------------

    /// Turn the top stock card onto the waste.
    pub fn deal_from_stock(&mut self) -> Result<(), MoveError> {
        let mut card = self.stock.pop().ok_or(MoveError::EmptyStock)?;
        card.face_up = true;
        debug!("Dealt {} to waste", card);
        self.waste.push(card);
        Ok(())
    }

    /// Turn the waste back over into the stock so it deals in the same order
    /// again. Cards still in the stock stay on top of the restored ones.
    pub fn restore_stock(&mut self) {
        let mut restored: Vec<Card> = self
            .waste
            .drain(..)
            .rev()
            .map(|mut card| {
                card.face_up = false;
                card
            })
            .collect();
        restored.append(&mut self.stock);
        self.stock = restored;
        debug!("Restored stock: {} cards", self.stock.len());
    }

    /// Deal a card, or restore the stock once it has run out.
    pub fn draw(&mut self) {
        if let Err(MoveError::EmptyStock) = self.deal_from_stock() {
            self.restore_stock();
        }
    }

    // -------------------------------------------------------------------------
    // Move Validation
    // -------------------------------------------------------------------------

    /// Could `card` be placed on tableau column `index` right now?
    pub fn can_move_card_to_tableau(&self, card: &Card, index: usize) -> bool {
        assert!(index < KLONDIKE_COLUMNS, "Invalid index: {}", index);
        self.rules
            .is_valid_tableau_placement(card, self.tableau[index].last())
    }

    pub fn can_move_from_waste_to_tableau(&self, index: usize) -> bool {
        self.check_waste_to_tableau(index).is_ok()
    }

    pub fn can_move_tableau_pile(&self, src: usize, target: usize) -> bool {
        self.tableau_cut(src, target).is_ok()
    }

    pub fn can_move_to_foundation_from_waste(&self) -> bool {
        self.waste_foundation_slot().is_ok()
    }

    pub fn can_move_to_foundation_from_tableau(&self, index: usize) -> bool {
        self.tableau_foundation_slot(index).is_ok()
    }

    fn check_waste_to_tableau(&self, index: usize) -> Result<(), MoveError> {
        assert!(index < KLONDIKE_COLUMNS, "Invalid index: {}", index);
        let card = self
            .waste
            .last()
            .ok_or(MoveError::InvalidMove("Waste is empty"))?;
        if !self.can_move_card_to_tableau(card, index) {
            return Err(MoveError::InvalidMove("Card cannot go on that column"));
        }
        Ok(())
    }

    /// Index in `src` where the moved pile starts. The column is scanned from
    /// the top down and the first card that fits on `target` is the cut point.
    /// Cards above the cut are not checked against each other.
    fn tableau_cut(&self, src: usize, target: usize) -> Result<usize, MoveError> {
        assert!(src < KLONDIKE_COLUMNS, "Invalid index: {}", src);
        assert!(target < KLONDIKE_COLUMNS, "Invalid index: {}", target);
        if src == target {
            return Err(MoveError::InvalidMove("Source is same as destination"));
        }

        let target_card = self.tableau[target].last();
        self.tableau[src]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, card)| self.rules.is_valid_tableau_placement(card, target_card))
            .map(|(i, _)| i)
            .ok_or(MoveError::InvalidMove("Nothing in that column can go there"))
    }

    fn waste_foundation_slot(&self) -> Result<usize, MoveError> {
        let card = self
            .waste
            .last()
            .ok_or(MoveError::InvalidMove("Waste is empty"))?;
        find_foundation_slot(&self.foundations, card)
            .ok_or(MoveError::InvalidMove("Card cannot go to a foundation yet"))
    }

    fn tableau_foundation_slot(&self, index: usize) -> Result<usize, MoveError> {
        assert!(index < KLONDIKE_COLUMNS, "Invalid index: {}", index);
        let card = self.tableau[index]
            .last()
            .ok_or(MoveError::InvalidMove("Column is empty"))?;
        if !card.face_up {
            return Err(MoveError::InvalidMove("Card is face down"));
        }
        find_foundation_slot(&self.foundations, card)
            .ok_or(MoveError::InvalidMove("Card cannot go to a foundation yet"))
    }

    // -------------------------------------------------------------------------
    // Move Execution
    // -------------------------------------------------------------------------

    pub fn move_from_waste_to_tableau(&mut self, index: usize) -> Result<(), MoveError> {
        self.check_waste_to_tableau(index)?;
        if let Some(card) = self.waste.pop() {
            debug!("Moved {} from waste to column {}", card, index);
            self.tableau[index].push(card);
        }
        Ok(())
    }

    /// Move the pile found by the top-down scan from `src` onto `target`,
    /// preserving its order.
    pub fn move_tableau_pile(&mut self, src: usize, target: usize) -> Result<(), MoveError> {
        let cut = self.tableau_cut(src, target)?;
        let pile: Vec<Card> = self.tableau[src].drain(cut..).collect();
        debug!("Moved {} card(s) from column {} to column {}", pile.len(), src, target);
        self.tableau[target].extend(pile);
        Ok(())
    }

    pub fn move_to_foundation_from_waste(&mut self) -> Result<(), MoveError> {
        let slot = self.waste_foundation_slot()?;
        if let Some(card) = self.waste.pop() {
            debug!("Moved {} from waste to foundation {}", card, slot);
            self.foundations[slot].push(card);
        }
        Ok(())
    }

    /// Move the top card of a column to its foundation. The card uncovered
    /// underneath is left as it is; see [`KlondikeGame::reveal_top`].
    pub fn move_to_foundation_from_tableau(&mut self, index: usize) -> Result<(), MoveError> {
        let slot = self.tableau_foundation_slot(index)?;
        if let Some(card) = self.tableau[index].pop() {
            debug!("Moved {} from column {} to foundation {}", card, index, slot);
            self.foundations[slot].push(card);
        }
        Ok(())
    }

    /// Turn the top card of a column face-up. Cards below the top are never
    /// touched.
    pub fn reveal_top(&mut self, index: usize) -> Result<(), MoveError> {
        assert!(index < KLONDIKE_COLUMNS, "Invalid index: {}", index);
        let top = self.tableau[index]
            .last_mut()
            .ok_or(MoveError::InvalidMove("Column is empty"))?;
        if !top.face_up {
            top.face_up = true;
            debug!("Revealed {} on column {}", top, index);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Win Condition
    // -------------------------------------------------------------------------

    pub fn won(&self) -> bool {
        foundations_complete(&self.foundations)
    }
}

impl Default for KlondikeGame {
    fn default() -> Self {
        Self::new()
    }
}
