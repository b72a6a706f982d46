//! Card dealing for the game loop

/// Shuffled weighted card stacks
pub mod stack;

pub use stack::CardStack;
