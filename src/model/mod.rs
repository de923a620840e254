pub mod geometry;
pub mod score;

pub use geometry::{Click, Rect};
pub use score::ScoreResult;
