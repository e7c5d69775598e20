use serde::{Deserialize, Serialize};

// Column names as the artifact was trained on them. These are an external contract with the
// model file: do not rename without re-exporting the artifact.
pub const KEY_CREDIT_POLICY: &str = "credit.policy";
pub const KEY_PURPOSE: &str = "purpose";
pub const KEY_INT_RATE: &str = "int.rate";
pub const KEY_INSTALLMENT: &str = "installment";
pub const KEY_LOG_ANNUAL_INC: &str = "log.annual.inc";
pub const KEY_DTI: &str = "dti";
pub const KEY_FICO: &str = "fico";
pub const KEY_DAYS_WITH_CR_LINE: &str = "days.with.cr.line";
pub const KEY_REVOL_BAL: &str = "revol.bal";
pub const KEY_REVOL_UTIL: &str = "revol.util";
pub const KEY_INQ_LAST_6MTHS: &str = "inq.last.6mths";
pub const KEY_DELINQ_2YRS: &str = "delinq.2yrs";
pub const KEY_PUB_REC: &str = "pub.rec";

/// Record keys in training order.
pub const FEATURE_KEYS: [&str; 13] = [
    KEY_CREDIT_POLICY,
    KEY_PURPOSE,
    KEY_INT_RATE,
    KEY_INSTALLMENT,
    KEY_LOG_ANNUAL_INC,
    KEY_DTI,
    KEY_FICO,
    KEY_DAYS_WITH_CR_LINE,
    KEY_REVOL_BAL,
    KEY_REVOL_UTIL,
    KEY_INQ_LAST_6MTHS,
    KEY_DELINQ_2YRS,
    KEY_PUB_REC,
];

pub const PURPOSES: [&str; 7] = [
    "debt_consolidation",
    "credit_card",
    "educational",
    "major_purchase",
    "small_business",
    "home_improvement",
    "other",
];

/// One borrower's input snapshot.
///
/// `purpose` is kept as free text: the collector only ever produces one of [`PURPOSES`], but a
/// record built by hand may carry anything and it is the model that rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerRecord {
    pub credit_policy: i64,
    pub purpose: String,
    pub interest_rate: f64,
    pub installment: f64,
    pub log_annual_income: f64,
    pub debt_to_income: f64,
    pub fico_score: i64,
    pub days_with_credit_line: f64,
    pub revolving_balance: f64,
    pub revolving_utilization: f64,
    pub inquiries_last_6mo: i64,
    pub delinquencies_2yr: i64,
    pub public_records: i64,
}

impl BorrowerRecord {
    pub fn to_feature_row(&self) -> FeatureRow {
        use FeatureValue::{Int, Real, Text};

        FeatureRow {
            values: vec![
                (KEY_CREDIT_POLICY, Int(self.credit_policy)),
                (KEY_PURPOSE, Text(self.purpose.clone())),
                (KEY_INT_RATE, Real(self.interest_rate)),
                (KEY_INSTALLMENT, Real(self.installment)),
                (KEY_LOG_ANNUAL_INC, Real(self.log_annual_income)),
                (KEY_DTI, Real(self.debt_to_income)),
                (KEY_FICO, Int(self.fico_score)),
                (KEY_DAYS_WITH_CR_LINE, Real(self.days_with_credit_line)),
                (KEY_REVOL_BAL, Real(self.revolving_balance)),
                (KEY_REVOL_UTIL, Real(self.revolving_utilization)),
                (KEY_INQ_LAST_6MTHS, Int(self.inquiries_last_6mo)),
                (KEY_DELINQ_2YRS, Int(self.delinquencies_2yr)),
                (KEY_PUB_REC, Int(self.public_records)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Real(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureValue::Int(_) => "integer",
            FeatureValue::Real(_) => "real",
            FeatureValue::Text(_) => "text",
        }
    }
}

/// A single-row, keyed input frame handed to a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<(&'static str, FeatureValue)>,
}

impl FeatureRow {
    pub fn get(&self, key: &str) -> Option<&FeatureValue> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, key: &'static str, value: FeatureValue) {
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.values.push((key, value)),
        }
    }

    #[cfg(test)]
    pub(crate) fn remove(&mut self, key: &str) {
        self.values.retain(|(k, _)| *k != key);
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> BorrowerRecord {
    BorrowerRecord {
        credit_policy: 1,
        purpose: "debt_consolidation".to_string(),
        interest_rate: 0.12,
        installment: 250.0,
        log_annual_income: 10.5,
        debt_to_income: 15.0,
        fico_score: 680,
        days_with_credit_line: 4000.0,
        revolving_balance: 8000.0,
        revolving_utilization: 35.0,
        inquiries_last_6mo: 1,
        delinquencies_2yr: 0,
        public_records: 0,
    }
}
