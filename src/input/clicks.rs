use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::model::Click;

/// One click event as reported by an image widget. Every field is optional;
/// events without usable coordinates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClickPayload {
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Displayed width; when set, `x` is in display space.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unix_time: Option<i64>,
}

impl ClickPayload {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Validates the payload and maps it into image pixel space. Without an
    /// image size the coordinates are taken as pixels already.
    pub fn to_click(&self, image_size: Option<(u32, u32)>) -> Option<Click> {
        let (x, y) = (self.x?, self.y?);
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (x, y) = match image_size {
            Some((w, h)) => (rescale(x, self.width, w), rescale(y, self.height, h)),
            None => (x, y),
        };
        Some(Click::new(x.floor() as i32, y.floor() as i32))
    }
}

fn rescale(v: f64, shown: Option<f64>, actual: u32) -> f64 {
    match shown {
        Some(s) if s > 0.0 && s.is_finite() => v * actual as f64 / s,
        _ => v,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawClick {
    Pair([f64; 2]),
    Payload(ClickPayload),
}

/// Parses a JSON array whose items are either `[x, y]` pairs or payload
/// objects.
pub fn parse_clicks_json(text: &str) -> Result<Vec<ClickPayload>, InputError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut out = Vec::with_capacity(raw.len());
    for (i, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<RawClick>(value) {
            Ok(RawClick::Pair([x, y])) => out.push(ClickPayload::at(x, y)),
            Ok(RawClick::Payload(p)) => out.push(p),
            Err(err) => tracing::debug!(index = i, %err, "dropping malformed click"),
        }
    }
    Ok(out)
}

pub fn parse_click_file(path: &Path) -> Result<Vec<ClickPayload>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_clicks_json(&text)
}

/// Parses one interactive line; anything that is not a JSON object or pair is
/// dropped.
pub fn parse_click_line(line: &str) -> Option<ClickPayload> {
    match serde_json::from_str::<RawClick>(line.trim()) {
        Ok(RawClick::Pair([x, y])) => Some(ClickPayload::at(x, y)),
        Ok(RawClick::Payload(p)) => Some(p),
        Err(err) => {
            tracing::debug!(%err, "dropping malformed click line");
            None
        }
    }
}
