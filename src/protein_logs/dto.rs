use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::ProteinLog;
use crate::{
    dates::{parse_iso_date, serialize_iso_date},
    error::AppError,
};

pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub food_name: String,
    pub protein_amount: f64,
}

impl CreateLogRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.food_name.trim().is_empty() {
            return Err(AppError::InvalidInput("food_name must not be empty".into()));
        }
        if !self.protein_amount.is_finite() || self.protein_amount < 0.0 {
            return Err(AppError::InvalidInput(
                "protein_amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListLogsQuery {
    pub date_filter: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    50
}

impl ListLogsQuery {
    pub fn validate(&self) -> Result<Option<Date>, AppError> {
        if !(1..=MAX_LIST_LIMIT).contains(&self.limit) {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }
        self.date_filter
            .as_deref()
            .map(|raw| {
                parse_iso_date(raw).map_err(|_| {
                    AppError::InvalidInput("date_filter must be formatted as YYYY-MM-DD".into())
                })
            })
            .transpose()
    }
}

/// A log as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProteinLogOut {
    pub id: Uuid,
    pub food_name: String,
    pub protein_amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

impl From<ProteinLog> for ProteinLogOut {
    fn from(log: ProteinLog) -> Self {
        Self {
            id: log.id,
            food_name: log.food_name,
            protein_amount: log.protein_amount,
            logged_at: log.logged_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: Date,
    pub total_protein: f64,
    pub goal: i32,
    pub remaining: f64,
    pub progress_percent: f64,
    pub log_count: usize,
    pub logs: Vec<ProteinLogOut>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: Date,
    pub day_name: String,
    pub protein: f64,
    pub goal_met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    #[serde(serialize_with = "serialize_iso_date")]
    pub week_start: Date,
    #[serde(serialize_with = "serialize_iso_date")]
    pub week_end: Date,
    pub daily_totals: Vec<DailyTotal>,
    pub total_weekly_protein: f64,
    pub average_daily: f64,
    pub days_goal_met: usize,
    pub goal: i32,
}
