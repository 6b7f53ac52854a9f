//! Server-rendered HTML for the screening form and its result blocks.

use std::fmt::Write;

use thyroid_inferences::Verdict;

use crate::form::{self, FieldSpec, Widget, COLUMNS};
use crate::models::PredictionRequest;

pub const NEGATIVE_MESSAGE: &str = "✅ No Hypothyroid (Negative) - Your thyroid function is normal.";
pub const POSITIVE_MESSAGE: &str = "⚠️ Hypothyroid Positive - Please consult a doctor.";

const ABOUT_HYPOTHYROIDISM: &str = r#"<section class="about">
  <h3>ℹ️ <strong>What is Hypothyroidism?</strong></h3>
  <p>Hypothyroidism occurs when the thyroid gland does not produce enough hormones, leading to slow metabolism.</p>
  <h3>🔍 <strong>Possible Symptoms:</strong></h3>
  <ul>
    <li>Fatigue &amp; Weakness</li>
    <li>Weight Gain</li>
    <li>Cold Sensitivity</li>
    <li>Dry Skin &amp; Hair Loss</li>
    <li>Depression &amp; Mood Changes</li>
    <li>Slow Heart Rate</li>
  </ul>
  <h3>🏥 <strong>What You Should Do?</strong></h3>
  <ul>
    <li>Consult an <strong>Endocrinologist</strong></li>
    <li>Get a <strong>TSH &amp; T4 Blood Test</strong></li>
    <li>Follow a <strong>Healthy Diet</strong> with iodine &amp; selenium</li>
    <li>Consider <strong>Medication (Levothyroxine)</strong></li>
  </ul>
</section>
"#;

const FAVICON: &str = "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🩺</text></svg>";

/// What to show under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verdict(Verdict),
    Invalid(String),
    Failed(String),
}

pub fn headline(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Negative => NEGATIVE_MESSAGE,
        Verdict::Positive => POSITIVE_MESSAGE,
    }
}

/// Result block for a verdict. Only a positive verdict carries the
/// educational section.
pub fn render_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Negative => alert("success", NEGATIVE_MESSAGE),
        Verdict::Positive => {
            let mut html = alert("error", POSITIVE_MESSAGE);
            html.push_str(ABOUT_HYPOTHYROIDISM);
            html
        }
    }
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Verdict(verdict) => render_verdict(*verdict),
        Outcome::Invalid(message) => alert("warning", &format!("Please check your input: {}", escape(message))),
        Outcome::Failed(message) => alert("error", &format!("Prediction failed: {}", escape(message))),
    }
}

/// The whole page, with `request` echoed back into the widgets.
pub fn render_page(request: &PredictionRequest, outcome: Option<&Outcome>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("  <title>Hypothyroid Prediction</title>\n");
    let _ = writeln!(html, "  <link rel=\"icon\" href=\"{FAVICON}\">");
    html.push_str("  <link rel=\"stylesheet\" href=\"/static/style.css\">\n");
    html.push_str("</head>\n<body>\n<main class=\"wide\">\n");
    html.push_str("<p class=\"title\">🔬 AI-based Hypothyroid Prediction</p>\n");
    html.push_str("<p class=\"subheader\">Enter the details below to check for hypothyroid risk.</p>\n");
    html.push_str("<hr>\n");

    html.push_str("<form method=\"post\" action=\"/\">\n<div class=\"columns\">\n");
    for index in 1..=COLUMNS {
        html.push_str("<div class=\"column\">\n");
        for spec in form::column(index) {
            render_widget(&mut html, spec, request.value_of(spec.name).unwrap_or_default());
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
    html.push_str("<div class=\"stButton\"><button type=\"submit\">🔍 Predict Now</button></div>\n");
    html.push_str("</form>\n");

    if let Some(outcome) = outcome {
        html.push_str("<div class=\"result\">\n");
        html.push_str(&render_outcome(outcome));
        html.push_str("</div>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_widget(html: &mut String, spec: &FieldSpec, value: f32) {
    let name = spec.name;
    let _ = writeln!(html, "<div class=\"field\">");
    let _ = writeln!(html, "  <label for=\"{name}\">{}</label>", spec.label);
    let _ = match spec.widget {
        Widget::Integer { min, max } => writeln!(
            html,
            "  <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{}\" required>",
            value as u32
        ),
        Widget::Decimal => writeln!(
            html,
            "  <input type=\"number\" id=\"{name}\" name=\"{name}\" step=\"0.01\" value=\"{value}\" required>"
        ),
        Widget::Flag => {
            let selected = |flag: f32| if value == flag { " selected" } else { "" };
            writeln!(
                html,
                "  <select id=\"{name}\" name=\"{name}\"><option value=\"0\"{}>0</option><option value=\"1\"{}>1</option></select>",
                selected(0.0),
                selected(1.0)
            )
        }
    };
    html.push_str("</div>\n");
}

fn alert(kind: &str, message: &str) -> String {
    format!("<div class=\"alert alert-{kind}\" role=\"alert\">{message}</div>\n")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
