//! Page rendering

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use credit_core::{PredictError, PredictionResult, THRESHOLD_PERCENT};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Form inputs in the order they appear on the page: (name, label)
pub const FORM_FIELDS: &[(&str, &str)] = &[
    ("LIMIT_BAL", "Credit limit"),
    ("SEX", "Sex (1 = male, 2 = female)"),
    ("EDUCATION", "Education (1 = graduate school, 2 = university, 3 = high school, 4 = other)"),
    ("MARRIAGE", "Marital status (1 = married, 2 = single, 3 = other)"),
    ("AGE", "Age"),
    ("PAY_0", "Repayment status, September"),
    ("PAY_2", "Repayment status, August"),
    ("PAY_3", "Repayment status, July"),
    ("PAY_4", "Repayment status, June"),
    ("PAY_5", "Repayment status, May"),
    ("PAY_6", "Repayment status, April"),
    ("BILL_AMT1", "Bill amount, September"),
    ("BILL_AMT2", "Bill amount, August"),
    ("BILL_AMT3", "Bill amount, July"),
    ("BILL_AMT4", "Bill amount, June"),
    ("BILL_AMT5", "Bill amount, May"),
    ("BILL_AMT6", "Bill amount, April"),
    ("PAY_AMT1", "Amount paid, September"),
    ("PAY_AMT2", "Amount paid, August"),
    ("PAY_AMT3", "Amount paid, July"),
    ("PAY_AMT4", "Amount paid, June"),
    ("PAY_AMT5", "Amount paid, May"),
    ("PAY_AMT6", "Amount paid, April"),
];

#[derive(Debug, Serialize)]
struct FormField<'a> {
    name: &'a str,
    label: &'a str,
    value: &'a str,
}

/// What the page shows below the form
#[derive(Debug, Default, Serialize)]
pub struct Outcome {
    pub prediction_text: Option<String>,
    pub probability_text: Option<String>,
    pub high_risk: Option<bool>,
    pub is_error: bool,
}

impl Outcome {
    pub fn from_result(result: Result<PredictionResult, PredictError>) -> Self {
        match result {
            Ok(prediction) => Self {
                prediction_text: Some(prediction.message().to_string()),
                probability_text: Some(prediction.probability_text()),
                high_risk: Some(prediction.label.is_high_risk()),
                is_error: false,
            },
            Err(e) => Self {
                prediction_text: Some(format!("An error occurred: {}", e)),
                is_error: true,
                ..Default::default()
            },
        }
    }
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the form page, echoing back `submitted` values.
    pub fn index(
        &self,
        submitted: &[(String, String)],
        outcome: &Outcome,
        model_loaded: bool,
    ) -> Result<Html<String>, minijinja::Error> {
        let fields: Vec<FormField> = FORM_FIELDS
            .iter()
            .map(|&(name, label)| FormField {
                name,
                label,
                value: submitted
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or(""),
            })
            .collect();

        let html = self.env.get_template("index.html")?.render(minijinja::context! {
            fields => fields,
            outcome => outcome,
            model_loaded => model_loaded,
            threshold => THRESHOLD_PERCENT,
        })?;

        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_core::RiskLabel;

    #[test]
    fn test_outcome_success() {
        let outcome = Outcome::from_result(Ok(PredictionResult::from_probability(62.3456)));
        assert_eq!(outcome.probability_text.as_deref(), Some("62.35%"));
        assert_eq!(
            outcome.prediction_text.as_deref(),
            Some(RiskLabel::HighRisk.message())
        );
        assert!(!outcome.is_error);
    }

    #[test]
    fn test_outcome_error() {
        let outcome = Outcome::from_result(Err(PredictError::ModelUnavailable("gone".into())));
        assert!(outcome.is_error);
        assert_eq!(
            outcome.prediction_text.as_deref(),
            Some("An error occurred: model is not available: gone")
        );
        assert!(outcome.probability_text.is_none());
    }

    #[test]
    fn test_index_escapes_submitted_values() {
        let views = Views::new().unwrap();
        let submitted = vec![("AGE".to_string(), "<script>".to_string())];
        let Html(html) = views.index(&submitted, &Outcome::default(), true).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
