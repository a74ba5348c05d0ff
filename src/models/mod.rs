//! Core data models for the battle tracker.

mod battle;
mod deck;
mod ids;
mod stats;

pub use battle::*;
pub use deck::*;
pub use ids::*;
pub use stats::*;
