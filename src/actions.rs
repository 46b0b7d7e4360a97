//! Mutating operations triggered by buttons: register, login, add expense
//! and set budget.

use crate::{
    api::ExpenseApi,
    dashboard::{self, PanelUpdate, REFRESH_BATCH},
    error::Error,
    models::{AddExpenseRequest, LoginRequest, RegisterRequest, SetBudgetRequest},
    refresh::Generation,
    session::{KeyValueStore, Session, SessionStore},
    view::{self, StatusLine, Tone},
};

fn require(value: &str, message: &'static str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation(message));
    }
    Ok(())
}

/// Creates an account. The returned line carries the server's message or
/// its error text.
pub async fn register<A>(api: &A, request: RegisterRequest) -> StatusLine
where
    A: ExpenseApi + ?Sized,
{
    let checked = require(&request.name, "Enter name, email and password")
        .and_then(|_| require(&request.email, "Enter name, email and password"))
        .and_then(|_| require(&request.password, "Enter name, email and password"));
    if let Err(err) = checked {
        return StatusLine::from_error(&err, "");
    }

    match api
        .register(&request)
        .await
        .and_then(|reply| reply.into_result())
    {
        Ok(message) => StatusLine::new(message, Tone::Success),
        Err(err) => {
            log::warn!("register failed: {err}");
            StatusLine::from_error(&err, "Registration failed")
        }
    }
}

/// Checks credentials and stores the resulting session.
pub async fn login<A, S>(
    api: &A,
    store: &SessionStore<S>,
    request: LoginRequest,
) -> Result<Session, Error>
where
    A: ExpenseApi + ?Sized,
    S: KeyValueStore,
{
    require(&request.email, "Enter email and password")?;
    require(&request.password, "Enter email and password")?;

    let reply = api.login(&request).await?;
    if let Some(error) = reply.error {
        return Err(Error::Server(error));
    }
    let user_id = reply
        .user_id
        .ok_or_else(|| Error::Decode("login reply has no user_id".to_string()))?;

    let session = store.save(&user_id, reply.name.as_deref().unwrap_or_default())?;
    log::info!("logged in as user {user_id}");
    Ok(session)
}

/// The add-expense form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseInput {
    pub amount: String,
    pub category: String,
}

impl ExpenseInput {
    fn validate(&self) -> Result<(), Error> {
        require(&self.amount, "Enter amount and category")?;
        require(&self.category, "Enter amount and category")
    }
}

pub async fn add_expense<A>(api: &A, session: &Session, input: &ExpenseInput) -> Result<(), Error>
where
    A: ExpenseApi + ?Sized,
{
    input.validate()?;

    let reply = api
        .add_expense(&AddExpenseRequest {
            user_id: session.user_id().to_string(),
            amount: input.amount.clone(),
            category: input.category.clone(),
        })
        .await?;

    match reply.error {
        Some(error) => Err(Error::Server(error)),
        None => Ok(()),
    }
}

/// Adds an expense, reports the outcome through `on_status`, and on success
/// reloads every dashboard panel exactly once.
///
/// The refresh takes a fresh ticket from `generation`, so a slower refresh
/// from an earlier submission cannot overwrite this one.
pub async fn add_expense_and_refresh<A>(
    api: &A,
    session: &Session,
    input: &ExpenseInput,
    generation: &Generation,
    on_status: &dyn Fn(StatusLine),
    sink: &dyn Fn(PanelUpdate),
) where
    A: ExpenseApi + ?Sized,
{
    if let Err(err) = add_expense(api, session, input).await {
        log::warn!("add expense failed: {err}");
        on_status(StatusLine::from_error(&err, "Failed to add expense"));
        return;
    }

    on_status(StatusLine::new("Expense added successfully", Tone::Success));

    let ticket = generation.advance();
    dashboard::run_batch(api, session.user_id(), &REFRESH_BATCH, &ticket, sink).await;
}

/// Saves the monthly budget and returns the feedback line plus the reloaded
/// budget status, when the server answered at all.
pub async fn save_budget<A>(
    api: &A,
    session: &Session,
    budget: &str,
) -> (StatusLine, Option<StatusLine>)
where
    A: ExpenseApi + ?Sized,
{
    if let Err(err) = require(budget, "Enter a budget amount") {
        return (StatusLine::from_error(&err, ""), None);
    }

    let reply = api
        .set_budget(&SetBudgetRequest {
            user_id: session.user_id().to_string(),
            budget: budget.to_string(),
        })
        .await;

    let feedback = match reply.and_then(|reply| reply.into_result()) {
        Ok(message) if message.is_empty() => StatusLine::new("Budget saved", Tone::Success),
        Ok(message) => StatusLine::new(message, Tone::Success),
        Err(err) if err.is_transport() => {
            log::warn!("set budget failed: {err}");
            return (StatusLine::from_error(&err, "Failed to save budget"), None);
        }
        Err(err) => StatusLine::from_error(&err, "Failed to save budget"),
    };

    (feedback, load_budget_line(api, session.user_id()).await)
}

pub async fn load_budget_line<A>(api: &A, user_id: &str) -> Option<StatusLine>
where
    A: ExpenseApi + ?Sized,
{
    match api.budget_status(user_id).await {
        Ok(status) => Some(view::budget_line(&status)),
        Err(err) => {
            log::warn!("budget status failed: {err}");
            None
        }
    }
}
