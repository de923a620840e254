//! Per-session interaction state. Each handler takes the current state and one
//! action and returns the next state; nothing is kept in globals.

pub mod quiz;
pub mod spot;

pub use quiz::{Answer, QuizAction, QuizState};
pub use spot::{SpotAction, SpotOutcome, SpotState, SpotTask};

#[cfg(test)]
#[path = "../../tests/src_inline/session/tests.rs"]
mod tests;
