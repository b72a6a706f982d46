//! Weighted card stacks dealt in shuffled order

use crate::io::configuration::{CardType, StackConfig};
use crate::io::error::{Result, invalid_input};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// A shuffled multiset of card types
///
/// A fresh stack holds `count` copies of every card type. Dealing from an
/// exhausted stack reshuffles a fresh copy and clears the dealt pile first.
#[derive(Debug, Clone)]
pub struct CardStack {
    name: String,
    card_types: Vec<CardType>,
    cards: Vec<usize>,
    dealt: Vec<usize>,
    rng: StdRng,
}

impl CardStack {
    /// Create and shuffle a stack
    ///
    /// # Errors
    ///
    /// Returns an error if the card types hold no copies in total
    pub fn new(name: impl Into<String>, card_types: Vec<CardType>, seed: u64) -> Result<Self> {
        let name = name.into();
        if card_types.iter().all(|card| card.count == 0) {
            return Err(invalid_input(
                "card stack",
                &name,
                &"stack must contain at least one card",
            ));
        }

        let mut stack = Self {
            name,
            card_types,
            cards: Vec::new(),
            dealt: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        stack.refill();
        Ok(stack)
    }

    /// Create a stack from its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured cards hold no copies in total
    pub fn from_config(config: &StackConfig, seed: u64) -> Result<Self> {
        Self::new(config.name.clone(), config.cards.clone(), seed)
    }

    /// Stack name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Card types in configuration order
    pub fn card_types(&self) -> &[CardType] {
        &self.card_types
    }

    /// Card type at `index`
    pub fn card(&self, index: usize) -> Option<&CardType> {
        self.card_types.get(index)
    }

    /// Cards left before a reshuffle
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// True when every card of the current shuffle was dealt
    pub fn is_exhausted(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card type indices dealt since the last shuffle, oldest first
    pub fn dealt(&self) -> &[usize] {
        &self.dealt
    }

    /// Deal the next card, reshuffling a fresh stack when exhausted
    ///
    /// Returns the index of the dealt card type.
    pub fn deal(&mut self) -> usize {
        if self.cards.is_empty() {
            log::info!(
                "All cards of '{}' were dealt, reshuffling a fresh stack",
                self.name
            );
            self.refill();
        }
        // Refill never leaves the stack empty, construction rejects zero-card stacks
        let card = self.cards.pop().unwrap_or_default();
        self.dealt.push(card);
        card
    }

    /// `name` and `description` of a card type on separate lines
    pub fn describe(&self, index: usize) -> Option<String> {
        self.card(index)
            .map(|card| format!("{}\n{}", card.name, card.description))
    }

    fn refill(&mut self) {
        self.cards = self
            .card_types
            .iter()
            .enumerate()
            .flat_map(|(index, card)| std::iter::repeat_n(index, card.count))
            .collect();
        self.cards.shuffle(&mut self.rng);
        self.dealt.clear();
    }
}
