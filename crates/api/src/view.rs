use loanrisk_core::collector::{BorrowerForm, ControlValue, NumberControl, SelectControl};
use loanrisk_core::domain::prediction::PredictionResult;
use loanrisk_core::model::{InferenceError, ModelLoadError};
use maud::{html, Markup, PreEscaped, Render, DOCTYPE};
use std::fmt::Display;

const PAGE_TITLE: &str = "Microfinance Loan Default Predictor";

const STYLE: &str = r#"
body {
    margin: 0;
    min-height: 100vh;
    background: linear-gradient(135deg, #0f172a 0%, #020617 40%, #0b1220 100%);
    color: #e5e7eb;
    font-family: "Segoe UI", system-ui, -apple-system, BlinkMacSystemFont, sans-serif;
}
.shell { display: flex; }
.sidebar { width: 260px; padding: 1.5rem; background: rgba(2,6,23,0.7); border-right: 1px solid rgba(148,163,184,0.2); }
.content { flex: 1; padding: 2rem 2.5rem; }
.main-title { font-size: 2.2rem; font-weight: 800; color: #f9fafb; letter-spacing: 0.03em; }
.sub-title { color: #9ca3af; font-size: 0.95rem; margin-bottom: 1.5rem; }
.columns { display: grid; grid-template-columns: 1.2fr 1fr; gap: 1.5rem; }
.grid-2 { display: grid; grid-template-columns: 1fr 1fr; gap: 0.8rem 1.2rem; }
.grid-3 { display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 0.8rem 1.2rem; }
.glass-card {
    background: rgba(15,23,42,0.85);
    border-radius: 18px;
    padding: 1.3rem 1.5rem;
    border: 1px solid rgba(148,163,184,0.35);
    box-shadow: 0 18px 45px rgba(15,23,42,0.7);
}
.glass-card h3 { color: #e5e7eb; font-size: 1.1rem; margin-bottom: 0.5rem; }
.field label { display: block; font-weight: 500; margin-bottom: 0.25rem; }
.field input, .field select {
    width: 100%; box-sizing: border-box; padding: 0.45rem 0.6rem; border-radius: 8px;
    border: 1px solid rgba(148,163,184,0.35); background: #0b1220; color: #e5e7eb;
}
.predict { margin-top: 1.5rem; width: 100%; padding: 0.8rem; border-radius: 12px; border: 0;
    background: #2563eb; color: #f9fafb; font-weight: 700; font-size: 1rem; cursor: pointer; }
.risk-badge {
    display: inline-flex; align-items: center; padding: 0.35rem 0.8rem; border-radius: 999px;
    font-size: 0.8rem; font-weight: 600; text-transform: uppercase; letter-spacing: 0.06em;
}
.risk-badge.low { background: rgba(22,163,74,0.15); color: #4ade80; border: 1px solid rgba(34,197,94,0.6); }
.risk-badge.high { background: rgba(220,38,38,0.15); color: #fca5a5; border: 1px solid rgba(239,68,68,0.7); }
.metrics { display: grid; grid-template-columns: 1fr 1fr; margin: 1rem 0; }
.metric-label { font-size: 0.9rem; color: #9ca3af; text-transform: uppercase; letter-spacing: 0.08em; margin-bottom: 0.2rem; }
.metric-value { font-size: 1.6rem; font-weight: 700; color: #e5e7eb; }
progress { width: 100%; height: 0.8rem; }
blockquote { border-left: 3px solid #64748b; margin: 1rem 0; padding-left: 0.8rem; }
.error-box { background: rgba(220,38,38,0.15); border: 1px solid rgba(239,68,68,0.7); color: #fecaca;
    border-radius: 12px; padding: 0.9rem 1.1rem; }
.footer-note { font-size: 0.8rem; color: #6b7280; margin-top: 1rem; }
"#;

/// Contents of the Risk Summary card for one render.
#[derive(Debug)]
pub enum Summary {
    Placeholder,
    Result(PredictionResult),
    Error(InferenceError),
}

pub fn dashboard_page(form: &BorrowerForm, summary: &Summary) -> Markup {
    layout(html! {
        form method="post" action="/predict" {
            div class="columns" {
                div class="glass-card" {
                    h3 { "Borrower Profile" }
                    div class="grid-2" {
                        div {
                            (select_field(&form.credit_policy))
                            (select_field(&form.purpose))
                            (number_field(&form.log_annual_income))
                            (number_field(&form.debt_to_income))
                        }
                        div {
                            (number_field(&form.fico_score))
                            (number_field(&form.days_with_credit_line))
                            (number_field(&form.inquiries_last_6mo))
                            (number_field(&form.delinquencies_2yr))
                        }
                    }
                    h3 { "Revolving Credit / Installment" }
                    div class="grid-3" {
                        (number_field(&form.interest_rate))
                        (number_field(&form.installment))
                        (number_field(&form.public_records))
                    }
                    div class="grid-2" {
                        (number_field(&form.revolving_balance))
                        (number_field(&form.revolving_utilization))
                    }
                }
                div class="glass-card" {
                    (risk_summary(summary))
                }
            }
            button class="predict" type="submit" { "Predict Default Risk" }
        }
    })
}

pub fn load_error_page(error: &ModelLoadError) -> Markup {
    layout(html! {
        div class="error-box" {
            "Could not load model: "
            code { (error.to_string()) }
        }
    })
}

fn layout(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="shell" {
                    (sidebar())
                    main class="content" {
                        div class="main-title" { (PAGE_TITLE) }
                        div class="sub-title" {
                            "Interactive dashboard to estimate the default risk of a borrower using machine learning."
                        }
                        (body)
                    }
                }
            }
        }
    }
}

fn sidebar() -> Markup {
    html! {
        aside class="sidebar" {
            h3 { "Project Info" }
            p {
                strong { "Loan Default Classification – Microfinance" }
                br;
                "Predict whether a borrower is likely to "
                strong { "fully pay" }
                " or "
                strong { "default" }
                " on a loan."
            }
            p { strong { "Tech stack:" } }
            ul {
                li { "Rust, axum" }
                li { "maud (server-side rendering)" }
                li { "Logistic-regression model artifact (JSON)" }
            }
        }
    }
}

fn risk_summary(summary: &Summary) -> Markup {
    html! {
        h3 { "Risk Summary" }
        @match summary {
            Summary::Placeholder => {
                p {
                    "Use the inputs on the left and click "
                    strong { "Predict Default Risk" }
                    " to see the default probability."
                }
            }
            Summary::Result(result) => (prediction(result)),
            Summary::Error(error) => {
                div class="error-box" { "Error during prediction: " (error.to_string()) }
            }
        }
    }
}

fn prediction(result: &PredictionResult) -> Markup {
    let badge = result.assessment.badge;
    let tier = result.assessment.tier;
    let advisory = tier.advisory();

    html! {
        span class={ "risk-badge " (badge.css_class()) } { (badge.label()) }
        div class="metrics" {
            div {
                div class="metric-label" { "Default Probability" }
                div class="metric-value" { (percent(result.default_probability)) }
            }
            div {
                div class="metric-label" { "Payback Probability" }
                div class="metric-value" { (percent(result.pay_probability)) }
            }
        }
        p { strong { "Risk Gauge (Default Probability)" } }
        progress value=(format!("{:.4}", result.default_probability)) max="1" {
            (percent(result.default_probability))
        }
        blockquote {
            @match advisory.split_once(tier.headline()) {
                Some((before, after)) => {
                    (before) strong { (tier.headline()) } (after)
                }
                None => (advisory),
            }
        }
        div class="footer-note" {
            "Predicted class: " (result.predicted_class.label())
            " · risk tier: " (tier.label())
            " · scored at " (result.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        }
        div class="footer-note" {
            "Note: This model is a decision support tool and should complement, not replace, human judgment."
        }
    }
}

// `step` stays "any" so off-grid values (4000 days, DTI 15.3) still submit; the control's step
// is only the increment hint shown next to the label.
fn number_field<T: ControlValue + Render>(control: &NumberControl<T>) -> Markup {
    html! {
        div class="field" {
            label for=(control.key) title={ "step " (control.step) } { (control.label) }
            input type="number" id=(control.key) name=(control.key)
                value=(control.value()) min=(control.min) max=[control.max] step="any";
        }
    }
}

fn select_field<T: PartialEq + Display + Render + 'static>(control: &SelectControl<T>) -> Markup {
    html! {
        div class="field" {
            label for=(control.key) { (control.label) }
            select id=(control.key) name=(control.key) {
                @for option in control.options {
                    option value=(option) selected[control.is_selected(option)] { (option) }
                }
            }
        }
    }
}

fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(p: f64) -> String {
        let result = PredictionResult::new(
            loanrisk_core::domain::prediction::PredictedClass::Default,
            p,
        );
        prediction(&result).into_string()
    }

    #[test]
    fn high_risk_card() {
        let html = rendered(0.82);
        assert!(html.contains("risk-badge high"));
        assert!(html.contains("HIGH RISK"));
        assert!(html.contains("82.0%"));
        assert!(html.contains("18.0%"));
        assert!(html.contains("<strong>very high risk</strong>"));
        assert!(html.contains("Predicted class: default"));
        assert!(html.contains("risk tier: High"));
    }

    #[test]
    fn moderate_card_keeps_low_badge() {
        let html = rendered(0.42);
        assert!(html.contains("risk-badge low"));
        assert!(html.contains("LOW RISK"));
        assert!(html.contains("Standard checks are recommended"));
        assert!(html.contains("<strong>moderate risk</strong>"));
    }

    #[test]
    fn boundary_card() {
        let html = rendered(0.5);
        assert!(html.contains("HIGH RISK"));
        assert!(html.contains("risk tier: Moderate-high"));
        assert!(html.contains("50.0%"));
    }

    #[test]
    fn form_marks_current_selection_and_bounds() {
        let html = dashboard_page(&BorrowerForm::default(), &Summary::Placeholder).into_string();
        assert!(html.contains(r#"<option value="debt_consolidation" selected>"#));
        assert!(html.contains(r#"name="fico" value="680" min="300" max="850" step="any""#));
        assert!(html.contains(r#"name="int.rate""#));
    }

    #[test]
    fn every_default_value_is_submittable() {
        let html = dashboard_page(&BorrowerForm::default(), &Summary::Placeholder).into_string();
        assert!(html.contains(
            r#"name="days.with.cr.line" value="4000" min="0" step="any""#
        ));
        let number_inputs = html.matches(r#"type="number""#).count();
        assert_eq!(number_inputs, 11);
        assert_eq!(html.matches(r#"step="any""#).count(), number_inputs);
    }

    #[test]
    fn load_error_escapes_detail() {
        let html = load_error_page(&ModelLoadError::Incompatible("<pickle>".to_string()))
            .into_string();
        assert!(html.contains("&lt;pickle&gt;"));
        assert!(!html.contains("<form"));
    }
}
