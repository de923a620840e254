use std::fmt::Write;
use std::time::Duration;

use crate::input::Problem;
use crate::model::ScoreResult;
use crate::report::format_ratio;
use crate::session::QuizState;

pub fn render_score_text(score: &ScoreResult, elapsed: Option<Duration>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TP={} FP={} FN={}", score.tp, score.fp, score.fn_);
    let _ = writeln!(
        out,
        "Precision={} Recall={} F1={}",
        format_ratio(score.precision),
        format_ratio(score.recall),
        format_ratio(score.f1)
    );
    if let Some(elapsed) = elapsed {
        let _ = writeln!(out, "Time={:.1}s", elapsed.as_secs_f64());
    }
    out
}

pub fn render_problem_list(problems: &[Problem]) -> String {
    let mut out = String::new();
    for (i, p) in problems.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. [{}] {}", i + 1, p.folder, p.title);
    }
    out
}

/// One screen of the quiz: button row, title, and the explanation once an
/// answer has been given.
pub fn render_quiz_view(problems: &[Problem], state: &QuizState, button_max: usize) -> String {
    let mut out = String::new();
    let Some(sel) = state.current(problems.len()) else {
        return out;
    };

    for i in 0..button_max {
        let label = if i == sel {
            format!("({})", i + 1)
        } else if i < problems.len() {
            format!("[{}]", i + 1)
        } else {
            " - ".to_string()
        };
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&label);
    }
    out.push('\n');

    let problem = &problems[sel];
    let _ = writeln!(out, "\n{}", problem.title);
    let _ = writeln!(
        out,
        "left: {}\nright: {}",
        problem.image_left.display(),
        problem.image_right.display()
    );

    if let Some(answer) = state.answer {
        let _ = writeln!(out, "\nAnswer: {:?}\nExplanation:\n{}", answer, problem.explanation);
    }
    out
}
