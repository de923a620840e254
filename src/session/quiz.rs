use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum Answer {
    #[value(name = "o", alias = "O")]
    O,
    #[value(name = "x", alias = "X")]
    X,
}

impl std::str::FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "o" | "O" => Ok(Answer::O),
            "x" | "X" => Ok(Answer::X),
            other => Err(format!("invalid answer: {other} (use o|x)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Select(usize),
    Answer(Answer),
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizState {
    pub selected: usize,
    pub answer: Option<Answer>,
}

impl QuizState {
    /// Selection clamped to the problems currently available.
    pub fn current(&self, n_problems: usize) -> Option<usize> {
        if n_problems == 0 {
            None
        } else {
            Some(self.selected.min(n_problems - 1))
        }
    }
}

/// Parses one interactive command line.
pub fn parse_quiz_command(line: &str) -> Option<QuizAction> {
    let line = line.trim();
    let arg = line.strip_prefix("select").map(str::trim).unwrap_or(line);
    if let Ok(n) = arg.parse::<usize>() {
        return n.checked_sub(1).map(QuizAction::Select);
    }
    if line.eq_ignore_ascii_case("reload") {
        return Some(QuizAction::Reload);
    }
    line.parse::<Answer>().ok().map(QuizAction::Answer)
}

/// Applies one action. Selecting a disabled button (beyond the problem count
/// or the button row) leaves the state untouched; any accepted selection
/// clears the answer.
pub fn apply(state: QuizState, action: QuizAction, n_problems: usize, button_max: usize) -> QuizState {
    match action {
        QuizAction::Select(i) if i < n_problems.min(button_max) => QuizState {
            selected: i,
            answer: None,
        },
        QuizAction::Select(i) => {
            tracing::debug!(button = i + 1, "ignoring disabled button");
            state
        }
        QuizAction::Answer(a) => QuizState {
            answer: Some(a),
            ..state
        },
        QuizAction::Reload => state,
    }
}
