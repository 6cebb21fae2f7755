use super::status::RecordStatus;
use crate::error::RecordError;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RecordId = u64;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: RecordId,
    #[serde(default, alias = "userId", alias = "user_id")]
    pub owner_id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default = "today", alias = "dateApplied")]
    pub date_applied: NaiveDate,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl ApplicationRecord {
    /// Applies a single field edit in place.
    pub fn apply(&mut self, value: &FieldValue) {
        match value {
            FieldValue::Company(text) => self.company = text.clone().unwrap_or_default(),
            FieldValue::Position(text) => self.position = text.clone().unwrap_or_default(),
            FieldValue::Status(status) => self.status = status.clone(),
            FieldValue::DateApplied(date) => self.date_applied = *date,
            FieldValue::Salary(salary) => self.salary = *salary,
        }
    }
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub owner_id: String,
    pub company: String,
    pub position: String,
    pub status: RecordStatus,
    pub date_applied: NaiveDate,
    pub salary: Option<f64>,
}

impl NewRecord {
    /// The blank row added by "Add Application": empty text, Applied, dated today.
    pub fn blank(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            company: String::new(),
            position: String::new(),
            status: RecordStatus::default(),
            date_applied: today(),
            salary: None,
        }
    }

    pub fn into_record(self, id: RecordId) -> ApplicationRecord {
        ApplicationRecord {
            id,
            owner_id: self.owner_id,
            company: self.company,
            position: self.position,
            status: self.status,
            date_applied: self.date_applied,
            salary: self.salary,
        }
    }
}

/// The editable columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Company,
    Position,
    Status,
    DateApplied,
    Salary,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::Company => "company",
            Field::Position => "position",
            Field::Status => "status",
            Field::DateApplied => "date_applied",
            Field::Salary => "salary",
        }
    }

    /// Interprets raw form input for this field.
    ///
    /// Empty text becomes `None` so it is stored as null, and an empty salary
    /// clears the salary. Dates use `YYYY-MM-DD`.
    pub fn parse_value(self, raw: &str) -> Result<FieldValue, RecordError> {
        let trimmed = raw.trim();
        let invalid = |reason: &str| RecordError::InvalidValue {
            field: self,
            value: raw.to_string(),
            reason: reason.to_string(),
        };
        let text = || (!raw.is_empty()).then(|| raw.to_string());

        match self {
            Field::Company => Ok(FieldValue::Company(text())),
            Field::Position => Ok(FieldValue::Position(text())),
            Field::Status if trimmed.is_empty() => Ok(FieldValue::Status(RecordStatus::default())),
            Field::Status => Ok(FieldValue::Status(RecordStatus::from(trimmed))),
            Field::DateApplied => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(FieldValue::DateApplied)
                .map_err(|e| invalid(&e.to_string())),
            Field::Salary if trimmed.is_empty() => Ok(FieldValue::Salary(None)),
            Field::Salary => {
                let salary: f64 = trimmed.parse().map_err(|_| invalid("not a number"))?;
                if !salary.is_finite() || salary < 0.0 {
                    return Err(invalid("salary must be a non-negative number"));
                }
                Ok(FieldValue::Salary(Some(salary)))
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A typed value for one field, as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Company(Option<String>),
    Position(Option<String>),
    Status(RecordStatus),
    DateApplied(NaiveDate),
    Salary(Option<f64>),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Company(_) => Field::Company,
            FieldValue::Position(_) => Field::Position,
            FieldValue::Status(_) => Field::Status,
            FieldValue::DateApplied(_) => Field::DateApplied,
            FieldValue::Salary(_) => Field::Salary,
        }
    }
}
