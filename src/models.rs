use serde::{Deserialize, Serialize};

use crate::clock;

pub type RowId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub id: RowId,
    pub day_name: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: RowId,
    pub day_id: RowId,
    pub time_from: String,
    pub time_to: String,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
}

/// A day as listed by `GET /api/days`, with its tasks embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledDay {
    #[serde(flatten)]
    pub day: Day,
    pub tasks: Vec<Task>,
}

/// Body of `POST /api/days` and `PATCH /api/days/:id`, and of the
/// "add routine" form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDay {
    pub day_name: String,
    pub date: String,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub day_id: RowId,
    #[serde(flatten)]
    pub fields: TaskFields,
}

/// The editable part of a task: body of `PATCH /api/tasks/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskFields {
    pub time_from: String,
    pub time_to: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// A request body that parsed but carries values the store should never see.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Invalid(pub String);

impl NewDay {
    pub fn validate(&self) -> Result<(), Invalid> {
        if self.day_name.trim().is_empty() {
            return Err(Invalid("day_name must not be empty".into()));
        }
        if clock::parse_date(&self.date).is_none() {
            return Err(Invalid(format!(
                "date must be a YYYY-MM-DD calendar date, got {:?}",
                self.date
            )));
        }
        Ok(())
    }
}

impl TaskFields {
    pub fn validate(&self) -> Result<(), Invalid> {
        for (field, value) in [("time_from", &self.time_from), ("time_to", &self.time_to)] {
            if clock::parse_time(value).is_none() {
                return Err(Invalid(format!(
                    "{field} must be HH:MM or HH:MM:SS, got {value:?}"
                )));
            }
        }
        if self.title.trim().is_empty() {
            return Err(Invalid("title must not be empty".into()));
        }
        Ok(())
    }
}
