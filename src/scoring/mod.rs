use crate::model::{Click, Rect, ScoreResult};

/// Greedy first-come matching of clicks to ground-truth rectangles.
///
/// Clicks are visited in input order and each takes the lowest-indexed unused
/// rectangle whose expanded box contains it. Rectangles are not validated.
pub fn score(clicks: &[Click], rects: &[Rect], radius: u32) -> ScoreResult {
    let mut used = vec![false; rects.len()];
    let mut matched = Vec::new();

    for (ci, &click) in clicks.iter().enumerate() {
        for (ri, rect) in rects.iter().enumerate() {
            if used[ri] || !rect.contains_expanded(click, radius) {
                continue;
            }
            used[ri] = true;
            matched.push((ci, ri));
            break;
        }
    }

    let tp = matched.len();
    let fp = clicks.len().saturating_sub(tp);
    let fn_ = rects.len() - used.iter().filter(|&&u| u).count();

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ScoreResult {
        tp,
        fp,
        fn_,
        precision,
        recall,
        f1,
        matched,
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scoring/tests.rs"]
mod tests;
