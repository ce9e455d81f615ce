//! Interactive form handlers
//!
//! One slider per measurement, posted back as `application/x-www-form-urlencoded`
//! with the wire names as keys.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};
use uuid::Uuid;

use crate::AppState;
use crate::features::{layout::display_label, FeatureVector, FEATURE_LAYOUT};
use crate::model::{PredictError, PredictionResult};
use super::predict::evaluate;

const PAGE_TITLE: &str = "💧 Water Potability Prediction";

/// Form pre-filled with the slider midpoints
pub async fn index() -> Html<String> {
    Html(render_page(&FeatureVector::default(), None))
}

/// Predict from the submitted form and render the verdict
pub async fn submit(
    State(state): State<AppState>,
    Form(features): Form<FeatureVector>,
) -> (StatusCode, Html<String>) {
    let outcome = evaluate(&state, Uuid::new_v4(), &features);
    let status = match outcome {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_REQUEST,
    };

    (status, Html(render_page(&features, Some(&outcome))))
}

fn render_page(
    features: &FeatureVector,
    outcome: Option<&Result<PredictionResult, PredictError>>,
) -> String {
    let mut html = String::with_capacity(4096);
    let values = features.to_array();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", PAGE_TITLE));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));
    html.push_str(
        "<p>Predicts whether water is safe for drinking based on 9 water quality parameters.</p>\n",
    );

    // Inputs
    html.push_str("<form method=\"post\" action=\"/\">\n<h2>Input Water Quality Parameters</h2>\n");
    for (spec, value) in FEATURE_LAYOUT.iter().zip(values.iter()) {
        html.push_str(&format!(
            "<label for=\"{name}\">{label}</label>\n\
             <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
             oninput=\"this.nextElementSibling.value = this.value\">\n\
             <output>{value}</output>\n",
            name = spec.name,
            label = display_label(spec),
            min = spec.min,
            max = spec.max,
            step = spec.step,
            value = value,
        ));
    }
    html.push_str("<button type=\"submit\">Predict Potability</button>\n</form>\n");

    if let Some(outcome) = outcome {
        // Echo of what was submitted
        html.push_str("<h2>Your Input Parameters</h2>\n<table>\n");
        for (spec, value) in FEATURE_LAYOUT.iter().zip(values.iter()) {
            let hint = if spec.in_typical_range(*value) { "" } else { " (outside typical range)" };
            html.push_str(&format!(
                "<tr><th>{}</th><td>{}{}</td></tr>\n",
                display_label(spec),
                value,
                hint
            ));
        }
        html.push_str("</table>\n<h2>Prediction</h2>\n");

        match outcome {
            Ok(result) => {
                let class = if result.label.is_potable() { "success" } else { "failure" };
                html.push_str(&format!(
                    "<p class=\"{}\"><strong>{}</strong></p>\n<p>Confidence: {}</p>\n",
                    class,
                    result.label.verdict(),
                    result.confidence_display()
                ));
            }
            Err(e) => {
                html.push_str(&format!("<p class=\"failure\">Rejected: {}</p>\n", e));
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

const STYLE: &str = "<style>\n\
body { font-family: sans-serif; max-width: 44rem; margin: 2rem auto; }\n\
form label { display: block; margin-top: .6rem; }\n\
form input[type=range] { width: 80%; }\n\
button { margin-top: 1rem; }\n\
.success { color: #176b2c; }\n\
.failure { color: #a4161a; }\n\
</style>\n";
