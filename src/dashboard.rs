//! Dashboard panels: which reads make up a refresh, how each reply becomes a
//! panel update, and the state those updates fold into.

use std::rc::Rc;

use futures_util::future::join_all;
use yew::Reducible;

use crate::{
    api::ExpenseApi,
    charts::{self, ChartConfig},
    models::Projection,
    refresh::Ticket,
    view::{
        self, CategoryMlRow, PredictionView, StatusLine, SummaryView, TableView, TrendView,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    Summary,
    CategoryChart,
    BudgetStatus,
    Prediction,
    MlTrend,
    CategoryMl,
}

/// Reads issued when the dashboard mounts. The category chart follows the
/// summary rather than being fetched alongside it.
pub const PAGE_LOAD_BATCH: [Panel; 5] = [
    Panel::Summary,
    Panel::BudgetStatus,
    Panel::Prediction,
    Panel::MlTrend,
    Panel::CategoryMl,
];

/// Reads issued after an expense is added: every panel, including the
/// category chart directly.
pub const REFRESH_BATCH: [Panel; 6] = [
    Panel::Summary,
    Panel::BudgetStatus,
    Panel::Prediction,
    Panel::MlTrend,
    Panel::CategoryChart,
    Panel::CategoryMl,
];

#[derive(Clone, Debug, PartialEq)]
pub enum PanelUpdate {
    Summary(SummaryView, ChartConfig),
    BudgetStatus(StatusLine),
    Prediction(PredictionView),
    MlTrend(TrendView, Option<ChartConfig>),
    CategoryChart(ChartConfig),
    CategoryMl(TableView<CategoryMlRow>),
}

impl PanelUpdate {
    pub fn panel(&self) -> Panel {
        match self {
            PanelUpdate::Summary(..) => Panel::Summary,
            PanelUpdate::BudgetStatus(_) => Panel::BudgetStatus,
            PanelUpdate::Prediction(_) => Panel::Prediction,
            PanelUpdate::MlTrend(..) => Panel::MlTrend,
            PanelUpdate::CategoryChart(_) => Panel::CategoryChart,
            PanelUpdate::CategoryMl(_) => Panel::CategoryMl,
        }
    }
}

/// Fetches one panel's data.
///
/// `None` means the panel keeps what it currently shows: the request failed
/// and the panel has no fallback, or there was nothing to draw.
pub async fn load_panel<A>(api: &A, user_id: &str, panel: Panel) -> Option<PanelUpdate>
where
    A: ExpenseApi + ?Sized,
{
    match panel {
        Panel::Summary => match api.summary(user_id).await {
            Ok(summary) => Some(PanelUpdate::Summary(
                SummaryView::from(&summary),
                charts::expense_bar(summary.weekly_total, summary.monthly_total),
            )),
            Err(err) => {
                log::warn!("summary failed: {err}");
                None
            }
        },
        Panel::CategoryChart => match api.category_summary(user_id).await {
            Ok(summary) => {
                charts::category_pie(&summary.categories, &summary.amounts)
                    .map(PanelUpdate::CategoryChart)
            }
            Err(err) => {
                log::warn!("category summary failed: {err}");
                None
            }
        },
        Panel::BudgetStatus => match api.budget_status(user_id).await {
            Ok(status) => Some(PanelUpdate::BudgetStatus(view::budget_line(&status))),
            Err(err) => {
                log::warn!("budget status failed: {err}");
                None
            }
        },
        Panel::Prediction => {
            let prediction = match api.predict_month(user_id).await {
                Ok(projection) => PredictionView::from(&projection),
                Err(err) => {
                    log::warn!("prediction failed: {err}");
                    PredictionView::unavailable()
                }
            };
            Some(PanelUpdate::Prediction(prediction))
        }
        Panel::MlTrend => match api.ml_trend(user_id).await {
            Ok(projection) => {
                let chart = match &projection {
                    Projection::NotEnoughData => None,
                    Projection::Ready(report) => Some(charts::trend_line(
                        &report.labels,
                        &report.actual,
                        &report.predicted,
                    )),
                };
                Some(PanelUpdate::MlTrend(TrendView::from(&projection), chart))
            }
            Err(err) => {
                log::error!("ML trend failed: {err}");
                None
            }
        },
        Panel::CategoryMl => match api.ml_category_predict(user_id).await {
            Ok(projection) => Some(PanelUpdate::CategoryMl(view::category_ml_table(&projection))),
            Err(err) => {
                log::warn!("category predictions failed: {err}");
                None
            }
        },
    }
}

/// Loads every panel in `panels` concurrently, handing each update to
/// `sink` as soon as it arrives.
///
/// A successful summary is followed by a category chart load. Updates are
/// dropped once `ticket` is no longer current.
pub async fn run_batch<A>(
    api: &A,
    user_id: &str,
    panels: &[Panel],
    ticket: &Ticket,
    sink: &dyn Fn(PanelUpdate),
) where
    A: ExpenseApi + ?Sized,
{
    log::debug!("refresh batch #{} for {panels:?}", ticket.value());
    join_all(
        panels
            .iter()
            .map(|panel| load_chain(api, user_id, *panel, ticket, sink)),
    )
    .await;
}

async fn load_chain<A>(
    api: &A,
    user_id: &str,
    panel: Panel,
    ticket: &Ticket,
    sink: &dyn Fn(PanelUpdate),
) where
    A: ExpenseApi + ?Sized,
{
    let Some(update) = load_panel(api, user_id, panel).await else {
        return;
    };
    if !deliver(ticket, sink, update) || panel != Panel::Summary {
        return;
    }

    if let Some(update) = load_panel(api, user_id, Panel::CategoryChart).await {
        deliver(ticket, sink, update);
    }
}

fn deliver(ticket: &Ticket, sink: &dyn Fn(PanelUpdate), update: PanelUpdate) -> bool {
    if !ticket.is_current() {
        log::debug!(
            "dropping {:?} from superseded batch #{}",
            update.panel(),
            ticket.value()
        );
        return false;
    }
    sink(update);
    true
}

/// A chart waiting to be drawn. The revision changes on every update so the
/// page redraws even when the data is unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSlot {
    pub revision: u32,
    pub config: Option<ChartConfig>,
}

impl ChartSlot {
    fn draw(&mut self, config: ChartConfig) {
        self.revision = self.revision.wrapping_add(1);
        self.config = Some(config);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub summary: SummaryView,
    pub budget: StatusLine,
    pub prediction: PredictionView,
    pub trend: TrendView,
    pub category_ml: TableView<CategoryMlRow>,
    pub expense_chart: ChartSlot,
    pub category_chart: ChartSlot,
    pub trend_chart: ChartSlot,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            summary: SummaryView::default(),
            budget: StatusLine::loading(),
            prediction: PredictionView::default(),
            trend: TrendView::default(),
            category_ml: TableView::default(),
            expense_chart: ChartSlot::default(),
            category_chart: ChartSlot::default(),
            trend_chart: ChartSlot::default(),
        }
    }
}

impl Reducible for DashboardState {
    type Action = PanelUpdate;

    fn reduce(self: Rc<Self>, action: PanelUpdate) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PanelUpdate::Summary(summary, chart) => {
                next.summary = summary;
                next.expense_chart.draw(chart);
            }
            PanelUpdate::BudgetStatus(line) => next.budget = line,
            PanelUpdate::Prediction(prediction) => next.prediction = prediction,
            PanelUpdate::MlTrend(trend, chart) => {
                next.trend = trend;
                if let Some(chart) = chart {
                    next.trend_chart.draw(chart);
                }
            }
            PanelUpdate::CategoryChart(chart) => next.category_chart.draw(chart),
            PanelUpdate::CategoryMl(table) => next.category_ml = table,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        error::Error,
        models::{CategorySummary, Summary, TrendReport},
        refresh::Generation,
        test_utils::FakeApi,
    };

    fn collect(updates: &RefCell<Vec<PanelUpdate>>) -> impl Fn(PanelUpdate) + '_ {
        move |update| updates.borrow_mut().push(update)
    }

    #[tokio::test]
    async fn page_load_follows_summary_with_category_chart() {
        let api = FakeApi::default();
        let updates = RefCell::new(Vec::new());
        let ticket = Generation::new().advance();

        run_batch(&api, "1", &PAGE_LOAD_BATCH, &ticket, &collect(&updates)).await;

        assert_eq!(api.count("summary"), 1);
        assert_eq!(api.count("category-summary"), 1);
        assert_eq!(api.count("budget-status"), 1);
        assert_eq!(api.count("predict-month"), 1);
        assert_eq!(api.count("ml-trend"), 1);
        assert_eq!(api.count("ml-category-predict"), 1);
        assert_eq!(updates.borrow().len(), 6);
    }

    #[tokio::test]
    async fn failed_summary_skips_category_chart() {
        let api = FakeApi::default();
        api.fail("summary", Error::Network("offline".to_string()));
        let updates = RefCell::new(Vec::new());
        let ticket = Generation::new().advance();

        run_batch(&api, "1", &[Panel::Summary], &ticket, &collect(&updates)).await;

        assert_eq!(api.count("category-summary"), 0);
        assert!(updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn trend_sentinel_does_not_plot() {
        let api = FakeApi::default();
        *api.trend.borrow_mut() = Projection::NotEnoughData;

        let update = load_panel(&api, "1", Panel::MlTrend).await;

        assert_eq!(
            update,
            Some(PanelUpdate::MlTrend(
                TrendView {
                    headline: "Not enough data".to_string(),
                    insight: "Add at least 5 days of expenses".to_string(),
                },
                None
            ))
        );

        let state = Rc::new(DashboardState::default()).reduce(update.unwrap());
        assert_eq!(state.trend_chart, ChartSlot::default());
    }

    #[tokio::test]
    async fn trend_failure_leaves_panel_alone() {
        let api = FakeApi::default();
        api.fail("ml-trend", Error::Status(500));

        assert_eq!(load_panel(&api, "1", Panel::MlTrend).await, None);
    }

    #[tokio::test]
    async fn prediction_failure_uses_placeholder() {
        let api = FakeApi::default();
        api.fail("predict-month", Error::Network("offline".to_string()));

        let update = load_panel(&api, "1", Panel::Prediction).await;

        assert_eq!(
            update,
            Some(PanelUpdate::Prediction(PredictionView::unavailable()))
        );
    }

    #[tokio::test]
    async fn empty_categories_keep_existing_chart() {
        let api = FakeApi::default();
        *api.categories.borrow_mut() = CategorySummary::default();

        assert_eq!(load_panel(&api, "1", Panel::CategoryChart).await, None);
    }

    #[tokio::test]
    async fn superseded_batch_is_dropped() {
        let api = FakeApi::default();
        let updates = RefCell::new(Vec::new());
        let generation = Generation::new();
        let stale = generation.advance();
        generation.advance();

        run_batch(&api, "1", &REFRESH_BATCH, &stale, &collect(&updates)).await;

        assert!(updates.borrow().is_empty());
        assert_eq!(api.count("category-summary"), 1);
    }

    #[test]
    fn redraw_bumps_revision_even_for_same_data() {
        let summary = Summary {
            weekly_total: 10.0,
            monthly_total: 30.0,
            current_streak: 2,
        };
        let update = PanelUpdate::Summary(
            SummaryView::from(&summary),
            charts::expense_bar(summary.weekly_total, summary.monthly_total),
        );

        let once = Rc::new(DashboardState::default()).reduce(update.clone());
        let twice = once.clone().reduce(update);

        assert_eq!(once.summary.streak, "2 Days");
        assert_eq!(once.expense_chart.revision, 1);
        assert_eq!(twice.expense_chart.revision, 2);
        assert_eq!(once.expense_chart.config, twice.expense_chart.config);
    }

    #[test]
    fn trend_update_with_chart_fills_slot() {
        let report = TrendReport {
            trend: "decreasing".to_string(),
            daily_change: -4.0,
            labels: vec!["2024-05-01".to_string()],
            actual: vec![20.0],
            predicted: vec![19.0],
        };
        let chart = charts::trend_line(&report.labels, &report.actual, &report.predicted);
        let update = PanelUpdate::MlTrend(
            TrendView::from(&Projection::Ready(report)),
            Some(chart.clone()),
        );

        let state = Rc::new(DashboardState::default()).reduce(update);

        assert_eq!(state.trend.headline, "DECREASING");
        assert_eq!(state.trend_chart.config, Some(chart));
    }
}
