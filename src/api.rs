//! HTTP client for the expense API.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config,
    error::Error,
    models::{
        AddExpenseRequest, AddExpenseResponse, BudgetStatus, CategoryPredictions,
        CategorySummary, ExpenseList, LoginRequest, LoginResponse, MessageResponse,
        MonthPrediction, Projection, RegisterRequest, SetBudgetRequest, Summary, TrendReport,
    },
};

/// One server route. Per-user reads carry the user id as a path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Register,
    Login,
    AddExpense,
    SetBudget,
    Summary(&'a str),
    CategorySummary(&'a str),
    BudgetStatus(&'a str),
    PredictMonth(&'a str),
    MlTrend(&'a str),
    MlCategoryPredict(&'a str),
    Expenses(&'a str),
}

impl Endpoint<'_> {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Register => "/register".to_string(),
            Endpoint::Login => "/login".to_string(),
            Endpoint::AddExpense => "/add-expense".to_string(),
            Endpoint::SetBudget => "/set-budget".to_string(),
            Endpoint::Summary(user_id) => format!("/summary/{user_id}"),
            Endpoint::CategorySummary(user_id) => format!("/category-summary/{user_id}"),
            Endpoint::BudgetStatus(user_id) => format!("/budget-status/{user_id}"),
            Endpoint::PredictMonth(user_id) => format!("/predict-month/{user_id}"),
            Endpoint::MlTrend(user_id) => format!("/ml-trend/{user_id}"),
            Endpoint::MlCategoryPredict(user_id) => format!("/ml-category-predict/{user_id}"),
            Endpoint::Expenses(user_id) => format!("/expenses/{user_id}"),
        }
    }
}

/// Every operation the pages need from the server.
///
/// Implemented by [`ApiClient`] in the browser and by an in-memory fake in
/// tests.
#[async_trait(?Send)]
pub trait ExpenseApi {
    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, Error>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, Error>;
    async fn add_expense(&self, request: &AddExpenseRequest)
        -> Result<AddExpenseResponse, Error>;
    async fn set_budget(&self, request: &SetBudgetRequest) -> Result<MessageResponse, Error>;
    async fn summary(&self, user_id: &str) -> Result<Summary, Error>;
    async fn category_summary(&self, user_id: &str) -> Result<CategorySummary, Error>;
    async fn budget_status(&self, user_id: &str) -> Result<BudgetStatus, Error>;
    async fn predict_month(&self, user_id: &str) -> Result<Projection<MonthPrediction>, Error>;
    async fn ml_trend(&self, user_id: &str) -> Result<Projection<TrendReport>, Error>;
    async fn ml_category_predict(
        &self,
        user_id: &str,
    ) -> Result<Projection<CategoryPredictions>, Error>;
    async fn expenses(&self, user_id: &str) -> Result<ExpenseList, Error>;
}

/// `fetch`-backed client bound to one base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(config::api_base_url())
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn url(&self, endpoint: Endpoint<'_>) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T, Error> {
        let url = self.url(endpoint);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;

        if !response.ok() {
            log::warn!("GET {url} returned {}", response.status());
            return Err(Error::Status(response.status()));
        }

        decode(response).await
    }

    /// Posts `body` and decodes the reply even when the status is not OK, so
    /// that the server's `error` field reaches the user.
    async fn post_json<B, T>(&self, endpoint: Endpoint<'_>, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        let response = Request::post(&url)
            .json(body)
            .map_err(|err| Error::Decode(err.to_string()))?
            .send()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        match decode(response).await {
            Ok(reply) => Ok(reply),
            Err(_) if !ok => {
                log::warn!("POST {url} returned {status}");
                Err(Error::Status(status))
            }
            Err(err) => Err(err),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    response
        .json::<T>()
        .await
        .map_err(|err| Error::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl ExpenseApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, Error> {
        self.post_json(Endpoint::Register, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, Error> {
        self.post_json(Endpoint::Login, request).await
    }

    async fn add_expense(
        &self,
        request: &AddExpenseRequest,
    ) -> Result<AddExpenseResponse, Error> {
        self.post_json(Endpoint::AddExpense, request).await
    }

    async fn set_budget(&self, request: &SetBudgetRequest) -> Result<MessageResponse, Error> {
        self.post_json(Endpoint::SetBudget, request).await
    }

    async fn summary(&self, user_id: &str) -> Result<Summary, Error> {
        self.get_json(Endpoint::Summary(user_id)).await
    }

    async fn category_summary(&self, user_id: &str) -> Result<CategorySummary, Error> {
        self.get_json(Endpoint::CategorySummary(user_id)).await
    }

    async fn budget_status(&self, user_id: &str) -> Result<BudgetStatus, Error> {
        self.get_json(Endpoint::BudgetStatus(user_id)).await
    }

    async fn predict_month(&self, user_id: &str) -> Result<Projection<MonthPrediction>, Error> {
        self.get_json(Endpoint::PredictMonth(user_id)).await
    }

    async fn ml_trend(&self, user_id: &str) -> Result<Projection<TrendReport>, Error> {
        self.get_json(Endpoint::MlTrend(user_id)).await
    }

    async fn ml_category_predict(
        &self,
        user_id: &str,
    ) -> Result<Projection<CategoryPredictions>, Error> {
        self.get_json(Endpoint::MlCategoryPredict(user_id)).await
    }

    async fn expenses(&self, user_id: &str) -> Result<ExpenseList, Error> {
        self.get_json(Endpoint::Expenses(user_id)).await
    }
}
