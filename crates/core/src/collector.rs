//! Form controls for the borrower profile.
//!
//! Controls behave like UI widgets: out-of-range input is clamped and unparseable input is
//! ignored, so [`BorrowerForm::snapshot`] always yields an in-domain record.

use crate::domain::record::{self, BorrowerRecord, PURPOSES};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

pub trait ControlValue: Copy + PartialOrd + FromStr + Display {
    fn is_acceptable(&self) -> bool {
        true
    }
}

impl ControlValue for i64 {}

impl ControlValue for f64 {
    fn is_acceptable(&self) -> bool {
        self.is_finite()
    }
}

#[derive(Debug, Clone)]
pub struct NumberControl<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub min: T,
    pub max: Option<T>,
    pub step: T,
    value: T,
}

impl<T: ControlValue> NumberControl<T> {
    fn new(
        key: &'static str,
        label: &'static str,
        default: T,
        min: T,
        max: Option<T>,
        step: T,
    ) -> Self {
        Self {
            key,
            label,
            min,
            max,
            step,
            value: default,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn set(&mut self, value: T) {
        if !value.is_acceptable() {
            return;
        }
        let mut v = value;
        if v < self.min {
            v = self.min;
        }
        if let Some(max) = self.max {
            if v > max {
                v = max;
            }
        }
        self.value = v;
    }

    pub fn set_text(&mut self, raw: &str) {
        if let Ok(v) = raw.trim().parse::<T>() {
            self.set(v);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectControl<T: 'static> {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [T],
    selected: usize,
}

impl<T: PartialEq + Display + 'static> SelectControl<T> {
    fn new(key: &'static str, label: &'static str, options: &'static [T]) -> Self {
        Self {
            key,
            label,
            options,
            selected: 0,
        }
    }

    pub fn value(&self) -> &T {
        &self.options[self.selected]
    }

    pub fn is_selected(&self, option: &T) -> bool {
        self.value() == option
    }

    pub fn set_text(&mut self, raw: &str) {
        let raw = raw.trim();
        if let Some(idx) = self.options.iter().position(|o| o.to_string() == raw) {
            self.selected = idx;
        }
    }
}

const CREDIT_POLICY_OPTIONS: [i64; 2] = [1, 0];

/// Current on-screen state of all 13 inputs.
#[derive(Debug, Clone)]
pub struct BorrowerForm {
    pub credit_policy: SelectControl<i64>,
    pub purpose: SelectControl<&'static str>,
    pub log_annual_income: NumberControl<f64>,
    pub debt_to_income: NumberControl<f64>,
    pub fico_score: NumberControl<i64>,
    pub days_with_credit_line: NumberControl<f64>,
    pub inquiries_last_6mo: NumberControl<i64>,
    pub delinquencies_2yr: NumberControl<i64>,
    pub interest_rate: NumberControl<f64>,
    pub installment: NumberControl<f64>,
    pub public_records: NumberControl<i64>,
    pub revolving_balance: NumberControl<f64>,
    pub revolving_utilization: NumberControl<f64>,
}

impl Default for BorrowerForm {
    fn default() -> Self {
        Self {
            credit_policy: SelectControl::new(
                record::KEY_CREDIT_POLICY,
                "Credit Policy (1 = meets, 0 = not)",
                &CREDIT_POLICY_OPTIONS,
            ),
            purpose: SelectControl::new(record::KEY_PURPOSE, "Loan Purpose", &PURPOSES),
            log_annual_income: NumberControl::new(
                record::KEY_LOG_ANNUAL_INC,
                "Log Annual Income",
                10.5,
                0.0,
                None,
                0.1,
            ),
            debt_to_income: NumberControl::new(
                record::KEY_DTI,
                "Debt-to-Income Ratio (DTI)",
                15.0,
                0.0,
                None,
                0.5,
            ),
            fico_score: NumberControl::new(
                record::KEY_FICO,
                "FICO Score",
                680,
                300,
                Some(850),
                1,
            ),
            days_with_credit_line: NumberControl::new(
                record::KEY_DAYS_WITH_CR_LINE,
                "Days with Credit Line",
                4000.0,
                0.0,
                None,
                30.0,
            ),
            inquiries_last_6mo: NumberControl::new(
                record::KEY_INQ_LAST_6MTHS,
                "Inquiries (last 6 months)",
                1,
                0,
                None,
                1,
            ),
            delinquencies_2yr: NumberControl::new(
                record::KEY_DELINQ_2YRS,
                "Delinquencies (last 2 years)",
                0,
                0,
                None,
                1,
            ),
            interest_rate: NumberControl::new(
                record::KEY_INT_RATE,
                "Interest Rate (e.g. 0.12)",
                0.12,
                0.0,
                Some(1.0),
                0.01,
            ),
            installment: NumberControl::new(
                record::KEY_INSTALLMENT,
                "Monthly Installment",
                250.0,
                0.0,
                None,
                10.0,
            ),
            public_records: NumberControl::new(
                record::KEY_PUB_REC,
                "Public Records",
                0,
                0,
                None,
                1,
            ),
            revolving_balance: NumberControl::new(
                record::KEY_REVOL_BAL,
                "Revolving Balance",
                8000.0,
                0.0,
                None,
                500.0,
            ),
            revolving_utilization: NumberControl::new(
                record::KEY_REVOL_UTIL,
                "Revolving Utilization (%)",
                35.0,
                0.0,
                Some(100.0),
                1.0,
            ),
        }
    }
}

impl BorrowerForm {
    /// Applies submitted values keyed by record column name. Keys that are absent leave the
    /// control unchanged.
    pub fn apply(&mut self, submitted: &HashMap<String, String>) {
        let get = |key: &str| submitted.get(key).map(String::as_str);

        if let Some(v) = get(self.credit_policy.key) {
            self.credit_policy.set_text(v);
        }
        if let Some(v) = get(self.purpose.key) {
            self.purpose.set_text(v);
        }

        for control in [
            &mut self.log_annual_income,
            &mut self.debt_to_income,
            &mut self.days_with_credit_line,
            &mut self.interest_rate,
            &mut self.installment,
            &mut self.revolving_balance,
            &mut self.revolving_utilization,
        ] {
            if let Some(v) = get(control.key) {
                control.set_text(v);
            }
        }

        for control in [
            &mut self.fico_score,
            &mut self.inquiries_last_6mo,
            &mut self.delinquencies_2yr,
            &mut self.public_records,
        ] {
            if let Some(v) = get(control.key) {
                control.set_text(v);
            }
        }
    }

    pub fn from_submission(submitted: &HashMap<String, String>) -> Self {
        let mut form = Self::default();
        form.apply(submitted);
        form
    }

    pub fn snapshot(&self) -> BorrowerRecord {
        BorrowerRecord {
            credit_policy: *self.credit_policy.value(),
            purpose: self.purpose.value().to_string(),
            interest_rate: self.interest_rate.value(),
            installment: self.installment.value(),
            log_annual_income: self.log_annual_income.value(),
            debt_to_income: self.debt_to_income.value(),
            fico_score: self.fico_score.value(),
            days_with_credit_line: self.days_with_credit_line.value(),
            revolving_balance: self.revolving_balance.value(),
            revolving_utilization: self.revolving_utilization.value(),
            inquiries_last_6mo: self.inquiries_last_6mo.value(),
            delinquencies_2yr: self.delinquencies_2yr.value(),
            public_records: self.public_records.value(),
        }
    }
}
