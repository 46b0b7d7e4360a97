//! In-memory stand-ins for the browser and the server.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap, HashSet},
    rc::Rc,
};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::ExpenseApi,
    charts::{ChartBackend, ChartConfig},
    error::Error,
    models::{
        AddExpenseRequest, AddExpenseResponse, BudgetState, BudgetStatus, CategoryPrediction,
        CategoryPredictions, CategorySummary, ExpenseList, ExpenseRecord, LoginRequest,
        LoginResponse, MessageResponse, MonthPrediction, Projection, RegisterRequest,
        SetBudgetRequest, Summary, TrendReport,
    },
    session::KeyValueStore,
};

/// A [`KeyValueStore`] backed by a shared map, so clones observe each other.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Rc<RefCell<BTreeMap<String, String>>>);

impl MemoryStore {
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.0
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Canned replies for every endpoint, with a log of what was called.
///
/// Calls are recorded by route name (`"summary"`, `"add-expense"`, ...).
pub struct FakeApi {
    calls: RefCell<Vec<&'static str>>,
    bodies: RefCell<Vec<(&'static str, Value)>>,
    failures: RefCell<HashMap<&'static str, Error>>,
    pub summary: RefCell<Summary>,
    pub categories: RefCell<CategorySummary>,
    pub budget: RefCell<BudgetStatus>,
    pub prediction: RefCell<Projection<MonthPrediction>>,
    pub trend: RefCell<Projection<TrendReport>>,
    pub category_ml: RefCell<Projection<CategoryPredictions>>,
    pub expenses: RefCell<ExpenseList>,
    pub login_reply: RefCell<LoginResponse>,
    pub add_reply: RefCell<AddExpenseResponse>,
    pub message_reply: RefCell<MessageResponse>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: RefCell::default(),
            bodies: RefCell::default(),
            failures: RefCell::default(),
            summary: RefCell::new(Summary {
                weekly_total: 165.5,
                monthly_total: 640.0,
                current_streak: 3,
            }),
            categories: RefCell::new(CategorySummary {
                categories: vec!["Food".to_string(), "Travel".to_string()],
                amounts: vec![120.0, 45.5],
            }),
            budget: RefCell::new(BudgetStatus {
                status: BudgetState::Safe,
                spent: 640.0,
                budget: 5000.0,
                percent: 12.8,
            }),
            prediction: RefCell::new(Projection::Ready(MonthPrediction {
                predicted_month_total: 1984.0,
                daily_average: 64.0,
            })),
            trend: RefCell::new(Projection::Ready(TrendReport {
                trend: "increasing".to_string(),
                daily_change: 5.25,
                labels: vec!["2024-05-01".to_string(), "2024-05-02".to_string()],
                actual: vec![45.5, 120.0],
                predicted: vec![45.5, 120.0],
            })),
            category_ml: RefCell::new(Projection::Ready(CategoryPredictions {
                predictions: vec![CategoryPrediction {
                    category: "Food".to_string(),
                    predicted_month_total: 3720.0,
                    trend: "stable".to_string(),
                }],
            })),
            expenses: RefCell::new(ExpenseList {
                expenses: vec![
                    ExpenseRecord {
                        date: "2024-05-02".to_string(),
                        category: "Food".to_string(),
                        amount: 120.0,
                    },
                    ExpenseRecord {
                        date: "2024-05-01".to_string(),
                        category: "Travel".to_string(),
                        amount: 45.5,
                    },
                ],
            }),
            login_reply: RefCell::default(),
            add_reply: RefCell::default(),
            message_reply: RefCell::new(MessageResponse {
                message: Some("Budget saved".to_string()),
                error: None,
            }),
        }
    }
}

impl FakeApi {
    /// Makes every later call to `route` fail with `error`.
    pub fn fail(&self, route: &'static str, error: Error) {
        self.failures.borrow_mut().insert(route, error);
    }

    pub fn count(&self, route: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == route).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    /// JSON bodies posted to `route`, oldest first.
    pub fn posted(&self, route: &str) -> Vec<Value> {
        self.bodies
            .borrow()
            .iter()
            .filter(|(name, _)| *name == route)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn call(&self, route: &'static str) -> Result<(), Error> {
        self.calls.borrow_mut().push(route);
        match self.failures.borrow().get(route) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn post<B: Serialize>(&self, route: &'static str, body: &B) -> Result<(), Error> {
        let body = serde_json::to_value(body).map_err(|err| Error::Decode(err.to_string()))?;
        self.bodies.borrow_mut().push((route, body));
        self.call(route)
    }
}

#[async_trait(?Send)]
impl ExpenseApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, Error> {
        self.post("register", request)?;
        Ok(self.message_reply.borrow().clone())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, Error> {
        self.post("login", request)?;
        Ok(self.login_reply.borrow().clone())
    }

    async fn add_expense(
        &self,
        request: &AddExpenseRequest,
    ) -> Result<AddExpenseResponse, Error> {
        self.post("add-expense", request)?;
        Ok(self.add_reply.borrow().clone())
    }

    async fn set_budget(&self, request: &SetBudgetRequest) -> Result<MessageResponse, Error> {
        self.post("set-budget", request)?;
        Ok(self.message_reply.borrow().clone())
    }

    async fn summary(&self, _user_id: &str) -> Result<Summary, Error> {
        self.call("summary")?;
        Ok(self.summary.borrow().clone())
    }

    async fn category_summary(&self, _user_id: &str) -> Result<CategorySummary, Error> {
        self.call("category-summary")?;
        Ok(self.categories.borrow().clone())
    }

    async fn budget_status(&self, _user_id: &str) -> Result<BudgetStatus, Error> {
        self.call("budget-status")?;
        Ok(self.budget.borrow().clone())
    }

    async fn predict_month(&self, _user_id: &str) -> Result<Projection<MonthPrediction>, Error> {
        self.call("predict-month")?;
        Ok(self.prediction.borrow().clone())
    }

    async fn ml_trend(&self, _user_id: &str) -> Result<Projection<TrendReport>, Error> {
        self.call("ml-trend")?;
        Ok(self.trend.borrow().clone())
    }

    async fn ml_category_predict(
        &self,
        _user_id: &str,
    ) -> Result<Projection<CategoryPredictions>, Error> {
        self.call("ml-category-predict")?;
        Ok(self.category_ml.borrow().clone())
    }

    async fn expenses(&self, _user_id: &str) -> Result<ExpenseList, Error> {
        self.call("expenses")?;
        Ok(self.expenses.borrow().clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChartEvent {
    Created(&'static str, usize),
    Destroyed(usize),
}

/// A [`ChartBackend`] that numbers each chart it creates and records every
/// create and destroy.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    canvases: Vec<&'static str>,
    next_id: usize,
    alive: HashSet<usize>,
    events: Vec<ChartEvent>,
}

impl RecordingBackend {
    pub fn with_canvases(canvases: &[&'static str]) -> Self {
        Self {
            canvases: canvases.to_vec(),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<ChartEvent> {
        self.events.clone()
    }

    /// Ids of charts created and not yet destroyed, ascending.
    pub fn alive(&self) -> Vec<usize> {
        let mut alive: Vec<usize> = self.alive.iter().copied().collect();
        alive.sort_unstable();
        alive
    }
}

impl ChartBackend for RecordingBackend {
    type Canvas = &'static str;
    type Instance = usize;

    fn locate(&self, canvas_id: &str) -> Option<&'static str> {
        self.canvases.iter().copied().find(|id| *id == canvas_id)
    }

    fn create(&mut self, canvas: &'static str, _config: &ChartConfig) -> Result<usize, Error> {
        let id = self.next_id;
        self.next_id += 1;
        self.alive.insert(id);
        self.events.push(ChartEvent::Created(canvas, id));
        Ok(id)
    }

    fn destroy(&mut self, instance: usize) {
        self.alive.remove(&instance);
        self.events.push(ChartEvent::Destroyed(instance));
    }
}
