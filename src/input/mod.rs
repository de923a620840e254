use std::path::PathBuf;

use thiserror::Error;

pub mod clicks;
pub mod problems;
pub mod text;

pub use clicks::{ClickPayload, parse_click_file};
pub use problems::{Problem, ProblemCache};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no problems to show; check the '{}' folder", .0.display())]
    NoProblems(PathBuf),
    #[error("problem #{index} does not exist ({available} available)")]
    UnknownProblem { index: usize, available: usize },
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
