use std::time::{Duration, Instant};

use crate::input::ClickPayload;
use crate::input::clicks::parse_click_line;
use crate::model::{Click, Rect, ScoreResult};
use crate::render::Letterbox;
use crate::scoring::score;

#[derive(Debug, Clone)]
pub enum SpotAction {
    Click(ClickPayload),
    Submit,
    Reset,
}

#[derive(Debug, Clone)]
pub struct SpotState {
    pub clicks: Vec<Click>,
    pub started_at: Instant,
    last_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotOutcome {
    pub score: ScoreResult,
    pub elapsed: Duration,
}

/// Ground truth and image size shared by every action of one session.
#[derive(Debug, Clone)]
pub struct SpotTask {
    pub rects: Vec<Rect>,
    pub radius: u32,
    pub image_size: (u32, u32),
    /// When set, clicks land on this letterboxed canvas rather than on the
    /// source image.
    pub view: Option<Letterbox>,
}

impl SpotTask {
    fn locate(&self, payload: &ClickPayload) -> Option<Click> {
        let Some(view) = &self.view else {
            return payload.to_click(Some(self.image_size));
        };
        let on_canvas = payload.to_click(Some(view.canvas.dimensions()))?;
        let cx = u32::try_from(on_canvas.x).ok()?;
        let cy = u32::try_from(on_canvas.y).ok()?;
        view.to_image(cx, cy)
    }
}

impl SpotState {
    pub fn new(now: Instant) -> Self {
        Self {
            clicks: Vec::new(),
            started_at: now,
            last_time: None,
        }
    }
}

pub fn parse_spot_command(line: &str) -> Option<SpotAction> {
    match line.trim() {
        "submit" => Some(SpotAction::Submit),
        "reset" => Some(SpotAction::Reset),
        other => parse_click_line(other).map(SpotAction::Click),
    }
}

/// Applies one action and returns the next state, plus a score on submit.
pub fn apply(
    mut state: SpotState,
    action: SpotAction,
    task: &SpotTask,
    now: Instant,
) -> (SpotState, Option<SpotOutcome>) {
    match action {
        SpotAction::Click(payload) => {
            if payload.unix_time.is_some() && payload.unix_time == state.last_time {
                tracing::debug!(t = ?payload.unix_time, "ignoring repeated click event");
                return (state, None);
            }
            match task.locate(&payload) {
                Some(click) => {
                    state.clicks.push(click);
                    state.last_time = payload.unix_time.or(state.last_time);
                }
                None => tracing::debug!(?payload, "dropping click outside the image"),
            }
            (state, None)
        }
        SpotAction::Submit => {
            let outcome = SpotOutcome {
                score: score(&state.clicks, &task.rects, task.radius),
                elapsed: now.saturating_duration_since(state.started_at),
            };
            (state, Some(outcome))
        }
        SpotAction::Reset => (SpotState::new(now), None),
    }
}
