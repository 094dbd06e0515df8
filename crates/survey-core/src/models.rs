use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── FieldValue ────────────────────────────────────────────────────────────────

/// A single dynamically-typed cell from the survey table.
///
/// The loading collaborator coerces every raw CSV cell into one of these
/// variants (see `coercion::ValueCoercer`), so downstream stages never see
/// raw strings where numbers are expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A finite numeric value.
    Number(f64),
    /// A boolean flag (`true` / `false` in the source file).
    Bool(bool),
    /// Any other non-empty text.
    Text(String),
    /// An empty cell.
    Null,
}

impl FieldValue {
    /// Truthiness of a cell, used for categorical presence checks.
    ///
    /// A cell counts as selected when it is a non-zero number, `true`, or a
    /// non-empty string. `Null` is always false.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Null => false,
        }
    }

    /// The numeric value of this cell, or `None` for anything non-numeric.
    ///
    /// Missing and non-numeric values are excluded from mean computation,
    /// never coerced to zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

// ── RawRecord ─────────────────────────────────────────────────────────────────

/// One surveyed visitor: a mapping of verbatim header name to cell value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    fields: HashMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value under the same header.
    pub fn insert(&mut self, header: impl Into<String>, value: FieldValue) {
        self.fields.insert(header.into(), value);
    }

    /// Look up a field by its verbatim header name.
    pub fn get(&self, header: &str) -> Option<&FieldValue> {
        self.fields.get(header)
    }

    /// Numeric value of a field, or `None` when absent or non-numeric.
    pub fn number(&self, header: &str) -> Option<f64> {
        self.fields.get(header).and_then(FieldValue::as_number)
    }

    /// Truthiness of a field; absent fields are false.
    pub fn is_truthy(&self, header: &str) -> bool {
        self.fields.get(header).is_some_and(FieldValue::is_truthy)
    }
}

// ── SurveyDataset ─────────────────────────────────────────────────────────────

/// A fully-parsed, in-memory survey table.
///
/// `headers` preserves the source column order and exact header text; the
/// category index relies on it for substring matching, so it must never be
/// normalized or re-cased.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    /// Column headers, verbatim and in file order.
    pub headers: Vec<String>,
    /// One record per survey respondent, in file order.
    pub records: Vec<RawRecord>,
}

// ── Cohort ────────────────────────────────────────────────────────────────────

/// One of the five fixed age buckets.
///
/// Buckets are mutually exclusive and exhaustive over all numeric ages:
/// closed on both ends except the open-ended last bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Cohort {
    #[serde(rename = "<18")]
    Under18,
    #[serde(rename = "18-30")]
    From18To30,
    #[serde(rename = "31-45")]
    From31To45,
    #[serde(rename = "46-60")]
    From46To60,
    #[serde(rename = "60+")]
    Over60,
}

impl Cohort {
    /// All cohorts in ascending age order.
    pub const ALL: [Cohort; 5] = [
        Cohort::Under18,
        Cohort::From18To30,
        Cohort::From31To45,
        Cohort::From46To60,
        Cohort::Over60,
    ];

    /// Assign a cohort to a numeric age.
    ///
    /// Total over all finite ages: every valid age maps to exactly one
    /// bucket. Boundary rule: 18 and 30 fall in `18-30`, 31 and 45 in
    /// `31-45`, 46 and 60 in `46-60`, 61 and above in `60+`.
    pub fn from_age(age: f64) -> Cohort {
        if age < 18.0 {
            Cohort::Under18
        } else if age <= 30.0 {
            Cohort::From18To30
        } else if age <= 45.0 {
            Cohort::From31To45
        } else if age <= 60.0 {
            Cohort::From46To60
        } else {
            Cohort::Over60
        }
    }

    /// Human-readable bucket label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Under18 => "<18",
            Cohort::From18To30 => "18-30",
            Cohort::From31To45 => "31-45",
            Cohort::From46To60 => "46-60",
            Cohort::Over60 => "60+",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cohort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cohort::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown cohort: {s}"))
    }
}

// ── NormalizedRecord ──────────────────────────────────────────────────────────

/// A raw record that passed the age quality filter, tagged with its cohort.
///
/// Immutable once created; the rest of the pipeline only reads it.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    record: RawRecord,
    cohort: Cohort,
}

impl NormalizedRecord {
    pub fn new(record: RawRecord, cohort: Cohort) -> Self {
        Self { record, cohort }
    }

    pub fn record(&self) -> &RawRecord {
        &self.record
    }

    pub fn cohort(&self) -> Cohort {
        self.cohort
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
