//! What each panel shows, derived from API replies.
//!
//! Nothing here touches the DOM; the page components render these values
//! as-is.

use crate::{
    config::CURRENCY_SYMBOL,
    error::Error,
    models::{
        BudgetState, BudgetStatus, CategoryPredictions, ExpenseList, MonthPrediction, Projection,
        Summary, TrendReport,
    },
};

/// Text colour of a status line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Plain,
    Muted,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn css_color(self) -> &'static str {
        match self {
            Tone::Plain => "inherit",
            Tone::Muted => "gray",
            Tone::Success => "green",
            Tone::Warning => "orange",
            Tone::Danger => "red",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn loading() -> Self {
        Self::new("Loading...", Tone::Muted)
    }

    /// Server errors verbatim, everything else as `fallback`.
    pub fn from_error(error: &Error, fallback: &str) -> Self {
        match error {
            Error::Server(message) => Self::new(message.clone(), Tone::Danger),
            Error::Validation(message) => Self::new(*message, Tone::Danger),
            _ => Self::new(fallback, Tone::Danger),
        }
    }
}

/// Formats a number the way the browser prints a JSON number: no trailing
/// `.0` on whole values.
pub fn number(value: f64) -> String {
    if value == 0.0 {
        // Avoid printing "-0".
        return "0".to_string();
    }
    value.to_string()
}

pub fn money(value: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", number(value))
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryView {
    pub weekly: String,
    pub monthly: String,
    pub streak: String,
}

impl Default for SummaryView {
    fn default() -> Self {
        Self {
            weekly: "0".to_string(),
            monthly: "0".to_string(),
            streak: "0 Days".to_string(),
        }
    }
}

impl From<&Summary> for SummaryView {
    fn from(summary: &Summary) -> Self {
        Self {
            weekly: number(summary.weekly_total),
            monthly: number(summary.monthly_total),
            streak: format!("{} Days", summary.current_streak),
        }
    }
}

pub fn budget_line(status: &BudgetStatus) -> StatusLine {
    let tone = match status.status {
        BudgetState::NotSet => return StatusLine::new("No budget set", Tone::Muted),
        BudgetState::Safe => Tone::Success,
        BudgetState::Warning => Tone::Warning,
        BudgetState::Over => Tone::Danger,
    };

    StatusLine::new(
        format!(
            "Spent {} / {} ({}%)",
            money(status.spent),
            money(status.budget),
            number(status.percent)
        ),
        tone,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub amount: String,
    pub note: String,
}

impl Default for PredictionView {
    fn default() -> Self {
        Self {
            amount: "0".to_string(),
            note: String::new(),
        }
    }
}

impl PredictionView {
    pub fn unavailable() -> Self {
        Self {
            amount: "0".to_string(),
            note: "Prediction unavailable".to_string(),
        }
    }
}

impl From<&Projection<MonthPrediction>> for PredictionView {
    fn from(projection: &Projection<MonthPrediction>) -> Self {
        match projection {
            Projection::NotEnoughData => Self {
                amount: "0".to_string(),
                note: "Not enough data".to_string(),
            },
            Projection::Ready(prediction) => Self {
                amount: number(prediction.predicted_month_total),
                note: format!("Avg daily spend: {}", money(prediction.daily_average)),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrendView {
    pub headline: String,
    pub insight: String,
}

impl From<&Projection<TrendReport>> for TrendView {
    fn from(projection: &Projection<TrendReport>) -> Self {
        match projection {
            Projection::NotEnoughData => Self {
                headline: "Not enough data".to_string(),
                insight: "Add at least 5 days of expenses".to_string(),
            },
            Projection::Ready(report) => Self {
                headline: report.trend.to_uppercase(),
                insight: format!("Avg daily change: {}", money(report.daily_change)),
            },
        }
    }
}

/// A table body: either data rows or exactly one full-width message row.
#[derive(Clone, Debug, PartialEq)]
pub enum TableView<R> {
    Placeholder(StatusLine),
    Rows(Vec<R>),
}

impl<R> Default for TableView<R> {
    fn default() -> Self {
        TableView::Placeholder(StatusLine::loading())
    }
}

impl<R> TableView<R> {
    /// How many `<tr>` elements the body renders.
    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        match self {
            TableView::Placeholder(_) => 1,
            TableView::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryMlRow {
    pub category: String,
    pub predicted_total: String,
    pub trend: String,
}

pub fn category_ml_table(projection: &Projection<CategoryPredictions>) -> TableView<CategoryMlRow> {
    match projection {
        Projection::NotEnoughData => {
            TableView::Placeholder(StatusLine::new("Not enough data for ML", Tone::Plain))
        }
        Projection::Ready(ready) => TableView::Rows(
            ready
                .predictions
                .iter()
                .map(|prediction| CategoryMlRow {
                    category: prediction.category.clone(),
                    predicted_total: format!(
                        "{CURRENCY_SYMBOL} {}",
                        number(prediction.predicted_month_total)
                    ),
                    trend: prediction.trend.to_uppercase(),
                })
                .collect(),
        ),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub date: String,
    pub category: String,
    pub amount: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryView {
    pub table: TableView<HistoryRow>,
    pub total: Option<f64>,
}

impl HistoryView {
    pub fn total_text(&self) -> String {
        number(self.total.unwrap_or(0.0))
    }
}

/// Builds the history table from the expenses reply.
///
/// The total is only computed when rows are shown; the empty and failed
/// states each render a single message row.
pub fn history_view(result: Result<ExpenseList, Error>) -> HistoryView {
    let list = match result {
        Ok(list) => list,
        Err(err) => {
            log::error!("history load failed: {err}");
            return HistoryView {
                table: TableView::Placeholder(StatusLine::new(
                    "Failed to load expenses",
                    Tone::Danger,
                )),
                total: None,
            };
        }
    };

    if list.expenses.is_empty() {
        return HistoryView {
            table: TableView::Placeholder(StatusLine::new("No expenses found", Tone::Plain)),
            total: None,
        };
    }

    let total = list.expenses.iter().map(|expense| expense.amount).sum();
    let rows = list
        .expenses
        .into_iter()
        .map(|expense| HistoryRow {
            date: expense.date,
            category: expense.category,
            amount: format!("{CURRENCY_SYMBOL} {}", number(expense.amount)),
        })
        .collect();

    HistoryView {
        table: TableView::Rows(rows),
        total: Some(total),
    }
}
