pub mod json;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn format_ratio(v: f64) -> String {
    format!("{:.3}", v)
}

/// Explanation text with line breaks kept for HTML display.
pub fn explanation_html(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Minimal page shown after an answer: the problem title and its explanation.
pub fn render_explanation_page(title: &str, explanation: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body><h4>{title}</h4>\n<p>{}</p></body></html>\n",
        explanation_html(explanation)
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tests.rs"]
mod tests;
