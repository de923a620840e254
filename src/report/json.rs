use std::time::Duration;

use serde::Serialize;

use crate::input::Problem;
use crate::model::ScoreResult;

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    tool: &'static str,
    version: &'static str,
    radius: u32,
    n_rects: usize,
    n_clicks: usize,
    #[serde(flatten)]
    score: &'a ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_secs: Option<f64>,
}

pub fn render_score_json(
    score: &ScoreResult,
    radius: u32,
    n_rects: usize,
    elapsed: Option<Duration>,
) -> Result<String, serde_json::Error> {
    let report = ScoreReport {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        radius,
        n_rects,
        n_clicks: score.tp + score.fp,
        score,
        elapsed_secs: elapsed.map(|d| d.as_secs_f64()),
    };
    serde_json::to_string_pretty(&report)
}

pub fn render_problems_json(problems: &[Problem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(problems)
}
