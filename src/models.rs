//! Wire types for the expense API.
//!
//! Request bodies carry form values as the raw text the user typed; the
//! server owns all parsing and arithmetic.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

const NOT_ENOUGH_DATA: &str = "not_enough_data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddExpenseRequest {
    pub user_id: String,
    pub amount: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetBudgetRequest {
    pub user_id: String,
    pub budget: String,
}

/// The `{message}` or `{error}` body returned by register and set-budget.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MessageResponse {
    /// The server's message, or its error as [`Error::Server`].
    pub fn into_result(self) -> Result<String, Error> {
        match (self.error, self.message) {
            (Some(error), _) => Err(Error::Server(error)),
            (None, Some(message)) => Ok(message),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "id_as_text")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddExpenseResponse {
    #[serde(default)]
    pub current_streak: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    pub weekly_total: f64,
    pub monthly_total: f64,
    #[serde(default)]
    pub current_streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategorySummary {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub amounts: Vec<f64>,
}

/// Where spending stands against the monthly limit.
///
/// The server calls the over-budget state `exceeded`; anything it sends that
/// is not one of the milder states is displayed as over budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BudgetState {
    NotSet,
    Safe,
    Warning,
    Over,
}

impl From<String> for BudgetState {
    fn from(status: String) -> Self {
        match status.as_str() {
            "not_set" => BudgetState::NotSet,
            "safe" => BudgetState::Safe,
            "warning" => BudgetState::Warning,
            _ => BudgetState::Over,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetStatus {
    pub status: BudgetState,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonthPrediction {
    pub predicted_month_total: f64,
    pub daily_average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrendReport {
    pub trend: String,
    pub daily_change: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub actual: Vec<f64>,
    #[serde(default)]
    pub predicted: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryPrediction {
    pub category: String,
    pub predicted_month_total: f64,
    pub trend: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryPredictions {
    #[serde(default)]
    pub predictions: Vec<CategoryPrediction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseRecord {
    pub date: String,
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseList {
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

/// A server-side projection that is skipped when the user has too little
/// history, signalled by `{"status": "not_enough_data"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection<T> {
    NotEnoughData,
    Ready(T),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Projection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        if value.get("status").and_then(Value::as_str) == Some(NOT_ENOUGH_DATA) {
            return Ok(Projection::NotEnoughData);
        }

        serde_json::from_value(value)
            .map(Projection::Ready)
            .map_err(serde::de::Error::custom)
    }
}

fn id_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "user_id must be a number or string, got {other}"
        ))),
    }
}
