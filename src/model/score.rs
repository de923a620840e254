use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// `(click_index, rect_index)` pairs in assignment order.
    pub matched: Vec<(usize, usize)>,
}
