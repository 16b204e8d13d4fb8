use std::{
    collections::BTreeMap,
    fmt,
    str::FromStr,
};

use chrono::{
    Local,
    NaiveDate,
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

use super::errors::{
    JobTrackError,
    Result,
};

pub type RowId = String;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// Display order, also the layout order of the statistics ring.
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ApplicationStatus::Applied => 0,
            ApplicationStatus::Interview => 1,
            ApplicationStatus::Offer => 2,
            ApplicationStatus::Rejected => 3,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JobTrackError::Custom(format!("Unknown status: {}", s)))
    }
}

// Hosted tables return `null` for empty columns.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: RowId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: BTreeMap<String, String>,
    // Owned by the store, never written by the tracker.
    #[serde(default, skip_serializing)]
    pub user_id: Option<String>,
}

impl Application {
    pub fn applied_at_text(&self) -> String {
        self.applied_at.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default()
    }

    pub fn custom_value(&self, column_id: &str) -> &str {
        self.custom_fields.get(column_id).map(String::as_str).unwrap_or("")
    }
}

/// The "new row" strip contents before it is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub applied_at: Option<NaiveDate>,
    pub notes: String,
    pub custom_fields: BTreeMap<String, String>,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            company: String::new(),
            role: String::new(),
            status: ApplicationStatus::Applied,
            applied_at: Some(Local::now().date_naive()),
            notes: String::new(),
            custom_fields: BTreeMap::new(),
        }
    }
}

impl ApplicationDraft {
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self { company: company.into(), role: role.into(), ..Self::default() }
    }

    pub fn custom_value(&self, column_id: &str) -> &str {
        self.custom_fields.get(column_id).map(String::as_str).unwrap_or("")
    }

    /// Empty values are not kept, so untouched custom columns are never sent.
    pub fn set_custom_value(&mut self, column_id: &str, value: String) {
        if value.is_empty() {
            self.custom_fields.remove(column_id);
        } else {
            self.custom_fields.insert(column_id.to_string(), value);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.company.trim().is_empty() || self.role.trim().is_empty() {
            return Err(JobTrackError::Validation(
                "Please fill in both Company and Position".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial application: the edit buffer entry and the update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<BTreeMap<String, String>>,
}

impl ApplicationPatch {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self { notes: Some(notes.into()), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self == &ApplicationPatch::default()
    }

    /// Drops every field whose value matches `saved`. Fields edited again since stay.
    pub fn clear_saved(&mut self, saved: &ApplicationPatch) {
        fn clear<T: PartialEq>(field: &mut Option<T>, saved: &Option<T>) {
            if saved.is_some() && field == saved {
                *field = None;
            }
        }

        clear(&mut self.company, &saved.company);
        clear(&mut self.role, &saved.role);
        clear(&mut self.status, &saved.status);
        clear(&mut self.applied_at, &saved.applied_at);
        clear(&mut self.notes, &saved.notes);
        clear(&mut self.custom_fields, &saved.custom_fields);
    }

    pub fn apply_to(&self, application: &mut Application) {
        if let Some(company) = &self.company {
            application.company = company.clone();
        }
        if let Some(role) = &self.role {
            application.role = role.clone();
        }
        if let Some(status) = self.status {
            application.status = status;
        }
        if let Some(applied_at) = self.applied_at {
            application.applied_at = applied_at;
        }
        if let Some(notes) = &self.notes {
            application.notes = notes.clone();
        }
        if let Some(custom_fields) = &self.custom_fields {
            application.custom_fields = custom_fields.clone();
        }
    }
}

/// A single cell edit coming from the table.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Company(String),
    Role(String),
    Status(ApplicationStatus),
    AppliedAt(Option<NaiveDate>),
    Notes(String),
    Custom { column_id: String, value: String },
}

impl FieldEdit {
    /// Folds this edit into `patch`. `stored_custom` seeds the custom map when the
    /// patch does not carry one yet, so sibling custom values are not dropped.
    pub fn fold_into(self, patch: &mut ApplicationPatch, stored_custom: &BTreeMap<String, String>) {
        match self {
            FieldEdit::Company(value) => patch.company = Some(value),
            FieldEdit::Role(value) => patch.role = Some(value),
            FieldEdit::Status(value) => patch.status = Some(value),
            FieldEdit::AppliedAt(value) => patch.applied_at = Some(value),
            FieldEdit::Notes(value) => patch.notes = Some(value),
            FieldEdit::Custom { column_id, value } => {
                patch
                    .custom_fields
                    .get_or_insert_with(|| stored_custom.clone())
                    .insert(column_id, value);
            }
        }
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}
