//! Decision provider implementations for the three kernel callers.
//!
//! The kernel treats every provider identically; these are the concrete
//! sources: scripted fixtures standing in for human input, the rule-based
//! AI policy, and the soak/regression bot.

mod hunter;
mod scripted;
mod soak_bot;

pub use hunter::HunterProvider;
pub use scripted::ScriptedProvider;
pub use soak_bot::SoakBotProvider;
