use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::card::{Card, DECK_SIZE, Deck};
use crate::error::MoveError;
use crate::rules::{FOUNDATIONS, Rules, find_foundation_slot, foundations_complete};

/// Number of tableau columns in Freecell.
pub const FREECELL_COLUMNS: usize = 8;
/// Number of free-cell slots.
pub const FREE_CELLS: usize = 4;

/// Where a single card is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The top card of a tableau column (0-indexed).
    Column(usize),
    /// A free-cell slot (0-indexed).
    FreeCell(usize),
}

/// A game of Freecell. Every card is dealt face-up and there is no stock.
#[derive(Debug, Clone)]
pub struct FreecellGame {
    /// 8 tableau columns; index 0 is leftmost.
    pub tableau: [Vec<Card>; FREECELL_COLUMNS],
    /// 4 single-card holding slots.
    pub freecells: [Option<Card>; FREE_CELLS],
    /// 4 foundations, each built Ace to King in one suit.
    pub foundations: [Vec<Card>; FOUNDATIONS],
    rules: Rules,
}

impl FreecellGame {
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

    /// Deal an already-ordered deck round-robin across the columns, so the
    /// first four columns get 7 cards and the rest get 6.
    pub fn from_deck(deck: Deck) -> Self {
        assert_eq!(deck.len(), DECK_SIZE, "Need exactly 52 cards to deal");

        let mut tableau: [Vec<Card>; FREECELL_COLUMNS] = Default::default();
        for (i, mut card) in deck.into_cards().into_iter().enumerate() {
            card.face_up = true;
            tableau[i % FREECELL_COLUMNS].push(card);
        }

        info!("Dealt Freecell across {} columns", FREECELL_COLUMNS);
        FreecellGame {
            tableau,
            freecells: [None; FREE_CELLS],
            foundations: Default::default(),
            rules: Rules::FREECELL,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the top card of a column, if any.
    pub fn column_top(&self, col: usize) -> Option<&Card> {
        assert!(col < FREECELL_COLUMNS, "Invalid index: {}", col);
        self.tableau[col].last()
    }

    /// The card that lives at a given `Location` (top of column or free cell).
    pub fn card_at(&self, loc: Location) -> Option<&Card> {
        match loc {
            Location::Column(c) => self.column_top(c),
            Location::FreeCell(f) => {
                assert!(f < FREE_CELLS, "Invalid free cell: {}", f);
                self.freecells[f].as_ref()
            }
        }
    }

    pub fn empty_freecells(&self) -> usize {
        self.freecells.iter().filter(|fc| fc.is_none()).count()
    }

    /// Number of empty columns, leaving out `except` if given.
    fn empty_columns(&self, except: Option<usize>) -> usize {
        self.tableau
            .iter()
            .enumerate()
            .filter(|&(i, col)| col.is_empty() && Some(i) != except)
            .count()
    }

    /// How many cards can move as one unit: `(free cells + 1) * 2^(empty columns)`,
    /// counting every empty column.
    pub fn max_movable_cards(&self) -> usize {
        (self.empty_freecells() + 1) << self.empty_columns(None)
    }

    /// Like [`FreecellGame::max_movable_cards`], but an empty `target` does
    /// not count as spare room for a move onto it.
    pub fn max_movable_cards_to(&self, target: usize) -> usize {
        (self.empty_freecells() + 1) << self.empty_columns(Some(target))
    }

    // -------------------------------------------------------------------------
    // Move Validation
    // -------------------------------------------------------------------------

    /// Could `card` be placed on tableau column `index` right now? Any card
    /// may open an empty column.
    pub fn can_move_card_to_tableau(&self, card: &Card, index: usize) -> bool {
        self.rules
            .is_valid_tableau_placement(card, self.column_top(index))
    }

    pub fn can_move_to_freecell(&self, index: usize) -> bool {
        self.freecell_slot_for(index).is_ok()
    }

    pub fn can_move_from_freecell_to_tableau(&self, cell: usize, index: usize) -> bool {
        self.check_freecell_to_tableau(cell, index).is_ok()
    }

    pub fn can_move_tableau_cards(&self, src: usize, target: usize, num_cards: usize) -> bool {
        self.supermove_start(src, target, num_cards).is_ok()
    }

    pub fn can_move_to_foundation(&self, index: usize) -> bool {
        self.foundation_slot(Location::Column(index)).is_ok()
    }

    pub fn can_move_from_freecell_to_foundation(&self, cell: usize) -> bool {
        self.foundation_slot(Location::FreeCell(cell)).is_ok()
    }

    /// First empty free cell that can take the top of column `index`.
    fn freecell_slot_for(&self, index: usize) -> Result<usize, MoveError> {
        if self.column_top(index).is_none() {
            return Err(MoveError::InvalidMove("Column is empty"));
        }
        self.freecells
            .iter()
            .position(Option::is_none)
            .ok_or(MoveError::InvalidMove("No free cell is available"))
    }

    fn check_freecell_to_tableau(&self, cell: usize, index: usize) -> Result<(), MoveError> {
        let card = self
            .card_at(Location::FreeCell(cell))
            .ok_or(MoveError::InvalidMove("Free cell is empty"))?;
        if !self.can_move_card_to_tableau(card, index) {
            return Err(MoveError::InvalidMove("Card cannot go on that column"));
        }
        Ok(())
    }

    /// Index in `src` where a move of its top `num_cards` cards starts.
    fn supermove_start(
        &self,
        src: usize,
        target: usize,
        num_cards: usize,
    ) -> Result<usize, MoveError> {
        assert!(src < FREECELL_COLUMNS, "Invalid index: {}", src);
        assert!(target < FREECELL_COLUMNS, "Invalid index: {}", target);
        if src == target {
            return Err(MoveError::InvalidMove("Source is same as destination"));
        }

        let pile = &self.tableau[src];
        if num_cards == 0 || num_cards > pile.len() {
            return Err(MoveError::InvalidMove("Not enough cards in that column"));
        }
        if num_cards > self.max_movable_cards() {
            return Err(MoveError::InvalidMove("Not enough free space to move that many cards"));
        }

        let start = pile.len() - num_cards;
        let group = &pile[start..];
        if !self.rules.is_valid_run(group) {
            return Err(MoveError::InvalidMove("Those cards are not in sequence"));
        }
        if !self.can_move_card_to_tableau(&group[0], target) {
            return Err(MoveError::InvalidMove("Cards cannot go on that column"));
        }

        // The target column's own emptiness is no help once the cards land there.
        let spare = self.empty_freecells() + self.empty_columns(Some(target));
        if num_cards > self.max_movable_cards_to(target) || num_cards - 1 > spare {
            return Err(MoveError::InvalidMove("Not enough free space to move that many cards"));
        }
        Ok(start)
    }

    fn foundation_slot(&self, src: Location) -> Result<usize, MoveError> {
        let card = self.card_at(src).ok_or(match src {
            Location::Column(_) => MoveError::InvalidMove("Column is empty"),
            Location::FreeCell(_) => MoveError::InvalidMove("Free cell is empty"),
        })?;
        if !card.face_up {
            return Err(MoveError::InvalidMove("Card is face down"));
        }
        find_foundation_slot(&self.foundations, card)
            .ok_or(MoveError::InvalidMove("Card cannot go to a foundation yet"))
    }

    // -------------------------------------------------------------------------
    // Move Execution
    // -------------------------------------------------------------------------

    /// Park the top card of column `index` in the first empty free cell.
    pub fn move_to_freecell(&mut self, index: usize) -> Result<(), MoveError> {
        let slot = self.freecell_slot_for(index)?;
        if let Some(card) = self.take_card(Location::Column(index)) {
            debug!("Moved {} from column {} to free cell {}", card, index, slot);
            self.freecells[slot] = Some(card);
        }
        Ok(())
    }

    pub fn move_from_freecell_to_tableau(&mut self, cell: usize, index: usize) -> Result<(), MoveError> {
        self.check_freecell_to_tableau(cell, index)?;
        if let Some(card) = self.take_card(Location::FreeCell(cell)) {
            debug!("Moved {} from free cell {} to column {}", card, cell, index);
            self.tableau[index].push(card);
        }
        Ok(())
    }

    /// Move the top `num_cards` cards of `src` onto `target` as one block.
    pub fn move_tableau_cards(
        &mut self,
        src: usize,
        target: usize,
        num_cards: usize,
    ) -> Result<(), MoveError> {
        let start = self.supermove_start(src, target, num_cards)?;
        let stack: Vec<Card> = self.tableau[src].drain(start..).collect();
        debug!("Moved {} card(s) from column {} to column {}", stack.len(), src, target);
        self.tableau[target].extend(stack);
        Ok(())
    }

    pub fn move_to_foundation(&mut self, index: usize) -> Result<(), MoveError> {
        self.move_location_to_foundation(Location::Column(index))
    }

    pub fn move_from_freecell_to_foundation(&mut self, cell: usize) -> Result<(), MoveError> {
        self.move_location_to_foundation(Location::FreeCell(cell))
    }

    fn move_location_to_foundation(&mut self, src: Location) -> Result<(), MoveError> {
        let slot = self.foundation_slot(src)?;
        if let Some(card) = self.take_card(src) {
            debug!("Moved {} from {:?} to foundation {}", card, src, slot);
            self.foundations[slot].push(card);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Win Condition
    // -------------------------------------------------------------------------

    pub fn won(&self) -> bool {
        foundations_complete(&self.foundations)
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn take_card(&mut self, loc: Location) -> Option<Card> {
        match loc {
            Location::Column(c) => self.tableau[c].pop(),
            Location::FreeCell(f) => self.freecells[f].take(),
        }
    }
}

impl Default for FreecellGame {
    fn default() -> Self {
        Self::new()
    }
}
