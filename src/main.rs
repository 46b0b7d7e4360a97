mod actions;
mod api;
mod charts;
mod config;
mod dashboard;
mod error;
mod models;
mod refresh;
mod session;
#[cfg(test)]
mod test_utils;
mod view;

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    actions::ExpenseInput,
    api::{ApiClient, ExpenseApi},
    charts::{ChartJs, ChartRegistry},
    config::{CATEGORY_CANVAS, CURRENCY_SYMBOL, EXPENSE_CANVAS, TREND_CANVAS},
    dashboard::{ChartSlot, DashboardState, PanelUpdate, PAGE_LOAD_BATCH},
    models::{LoginRequest, RegisterRequest},
    refresh::Generation,
    session::{BrowserStorage, Session, SessionStore},
    view::{HistoryView, StatusLine, TableView},
};

const EXPENSE_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Other",
];

fn session_store() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Page {
    Dashboard,
    History,
    Budget,
}

#[derive(Clone, Debug, PartialEq)]
enum Route {
    Login,
    Authenticated(Page, Session),
}

/// Authenticated pages need a stored session; without one every request
/// lands on the login screen.
fn resolve_route(session: Option<&Session>, requested: Page) -> Route {
    match session {
        Some(session) => Route::Authenticated(requested, session.clone()),
        None => Route::Login,
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    api: Rc<ApiClient>,
    session: Session,
}

fn status_line(line: &StatusLine) -> Html {
    html! {
        <p class="text-sm mt-2" style={format!("color: {};", line.tone.css_color())}>{ line.text.clone() }</p>
    }
}

/// Renders a table body: data rows, or one full-width message row.
fn table_body<R>(table: &TableView<R>, columns: usize, row: impl Fn(&R) -> Html) -> Html {
    match table {
        TableView::Placeholder(line) => html! {
            <tr>
                <td colspan={columns.to_string()} class="px-6 py-6" style={format!("text-align:center;color:{};", line.tone.css_color())}>
                    { line.text.clone() }
                </td>
            </tr>
        },
        TableView::Rows(rows) => html! {
            <>
                { for rows.iter().map(row) }
            </>
        },
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    user_name: String,
    active_page: Page,
    on_select: Callback<Page>,
    on_logout: Callback<()>,
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            page: Page::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "History",
            page: Page::History,
            icon: icon_list,
        },
        NavItem {
            label: "Budget",
            page: Page::Budget,
            icon: icon_wallet,
        },
    ];

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <div class="flex h-screen bg-background">
            <aside class="w-[220px] h-screen bg-[#1f2937] p-4 flex flex-col">
                <span class="text-white text-xl font-black tracking-tight px-2 mb-8">{"Expense Tracker"}</span>
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let class_name = if item.page == props.active_page {
                            "flex items-center gap-3 px-4 py-3 rounded-xl text-[13px] font-medium bg-[#667eea] text-white w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl text-[13px] font-medium text-slate-300 hover:bg-white/5 w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span>{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
                <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 text-[13px] font-medium text-slate-300">
                    { icon_log_out() }
                    <span>{"Log Out"}</span>
                </button>
            </aside>

            <div class="flex-1 flex flex-col overflow-hidden">
                <header class="border-b border-border h-16 flex items-center justify-end px-6">
                    <span class="text-sm text-muted-foreground">{"Hello, "}<strong id="userName">{ props.user_name.clone() }</strong></span>
                </header>
                <main class="flex-1 overflow-y-auto p-6">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[hook]
fn use_chart(
    registry: Rc<RefCell<ChartRegistry<ChartJs>>>,
    canvas_id: &'static str,
    slot: ChartSlot,
) {
    use_effect_with_deps(
        move |slot: &ChartSlot| {
            if let Some(config) = &slot.config {
                if let Err(err) = registry.borrow_mut().replace(canvas_id, config) {
                    log::error!("could not draw #{canvas_id}: {err}");
                }
            }
            || ()
        },
        slot,
    );
}

#[function_component(DashboardPage)]
fn dashboard_page(props: &PageProps) -> Html {
    let state = use_reducer(DashboardState::default);
    let generation = use_memo(|_| Generation::new(), ());
    let registry = use_mut_ref(|| ChartRegistry::new(ChartJs));

    let amount = use_state(String::new);
    let category = use_state(String::new);
    let add_status = use_state(|| None::<StatusLine>);

    {
        let api = props.api.clone();
        let dispatcher = state.dispatcher();
        let generation = generation.clone();

        use_effect_with_deps(
            move |session: &Session| {
                let user_id = session.user_id().to_string();
                let ticket = generation.advance();
                spawn_local(async move {
                    dashboard::run_batch(
                        &*api,
                        &user_id,
                        &PAGE_LOAD_BATCH,
                        &ticket,
                        &|update: PanelUpdate| dispatcher.dispatch(update),
                    )
                    .await;
                });
                move || {
                    generation.advance();
                }
            },
            props.session.clone(),
        );
    }

    {
        let registry = registry.clone();
        use_effect_with_deps(move |_| move || registry.borrow_mut().clear(), ());
    }

    use_chart(registry.clone(), EXPENSE_CANVAS, state.expense_chart.clone());
    use_chart(registry.clone(), CATEGORY_CANVAS, state.category_chart.clone());
    use_chart(registry, TREND_CANVAS, state.trend_chart.clone());

    let on_add = {
        let api = props.api.clone();
        let session = props.session.clone();
        let amount = amount.clone();
        let category = category.clone();
        let add_status = add_status.clone();
        let dispatcher = state.dispatcher();
        let generation = generation.clone();

        Callback::from(move |_| {
            let input = ExpenseInput {
                amount: (*amount).clone(),
                category: (*category).clone(),
            };
            let api = api.clone();
            let session = session.clone();
            let add_status = add_status.clone();
            let dispatcher = dispatcher.clone();
            let generation = generation.clone();

            spawn_local(async move {
                actions::add_expense_and_refresh(
                    &*api,
                    &session,
                    &input,
                    &generation,
                    &|line: StatusLine| add_status.set(Some(line)),
                    &|update: PanelUpdate| dispatcher.dispatch(update),
                )
                .await;
            });
        })
    };

    html! {
        <div class="max-w-7xl mx-auto space-y-6">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground mb-2">{"This Week"}</p>
                    <h3 id="weeklyTotal" class="text-2xl font-bold">{ format!("{CURRENCY_SYMBOL}{}", state.summary.weekly) }</h3>
                </div>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground mb-2">{"This Month"}</p>
                    <h3 id="monthlyTotal" class="text-2xl font-bold">{ format!("{CURRENCY_SYMBOL}{}", state.summary.monthly) }</h3>
                </div>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground mb-2">{"Streak"}</p>
                    <h3 id="streakCount" class="text-2xl font-bold">{ state.summary.streak.clone() }</h3>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-lg mb-3">{"Add Expense"}</h3>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                        <input id="amount" type="number" placeholder={format!("Amount ({CURRENCY_SYMBOL})")} value={(*amount).clone()} oninput={{
                            let amount = amount.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                amount.set(input.value());
                            })
                        }} class="p-2 border rounded" />
                        <select id="category" onchange={{
                            let category = category.clone();
                            Callback::from(move |e: Event| {
                                let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                category.set(input.value());
                            })
                        }} class="p-2 border rounded">
                            <option value="" selected={category.is_empty()}>{"Select category"}</option>
                            { for EXPENSE_CATEGORIES.iter().map(|name| html! {
                                <option value={*name} selected={*category == *name}>{ *name }</option>
                            }) }
                        </select>
                        <button id="addExpenseBtn" onclick={on_add} class="bg-[#667eea] text-white px-4 rounded">{"Add"}</button>
                    </div>
                    if let Some(line) = &*add_status {
                        <div id="successMsg">{ status_line(line) }</div>
                    }
                </div>

                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-lg mb-3">{"Budget"}</h3>
                    <div id="budgetStatus">{ status_line(&state.budget) }</div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-lg mb-3">{"Spending Overview"}</h3>
                    <div class="relative h-64"><canvas id={EXPENSE_CANVAS}></canvas></div>
                </div>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-lg mb-3">{"By Category"}</h3>
                    <div class="relative h-64"><canvas id={CATEGORY_CANVAS}></canvas></div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground mb-2">{"Predicted This Month"}</p>
                    <h3 class="text-2xl font-bold">{ CURRENCY_SYMBOL }<span id="predictedAmount">{ state.prediction.amount.clone() }</span></h3>
                    <p id="predictionNote" class="text-xs text-muted-foreground mt-2">{ state.prediction.note.clone() }</p>
                </div>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground mb-2">{"Spending Trend"}</p>
                    <h3 id="mlTrend" class="text-2xl font-bold">{ state.trend.headline.clone() }</h3>
                    <p id="mlInsight" class="text-xs text-muted-foreground mt-2">{ state.trend.insight.clone() }</p>
                </div>
            </div>

            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h3 class="font-bold text-lg mb-3">{"Actual vs Trend"}</h3>
                <div class="relative h-72"><canvas id={TREND_CANVAS}></canvas></div>
            </div>

            <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                <div class="px-6 py-4 border-b border-border">
                    <h3 class="text-lg font-bold">{"Category Forecast"}</h3>
                </div>
                <table class="w-full text-left border-collapse">
                    <thead class="bg-secondary border-b border-border">
                        <tr>
                            <th class="px-6 py-3 text-sm font-semibold">{"Category"}</th>
                            <th class="px-6 py-3 text-sm font-semibold">{"Predicted"}</th>
                            <th class="px-6 py-3 text-sm font-semibold">{"Trend"}</th>
                        </tr>
                    </thead>
                    <tbody id="mlCategoryTable" class="divide-y divide-border">
                        { table_body(&state.category_ml, 3, |row| html! {
                            <tr class="text-sm">
                                <td class="px-6 py-3">{ row.category.clone() }</td>
                                <td class="px-6 py-3">{ row.predicted_total.clone() }</td>
                                <td class="px-6 py-3">{ row.trend.clone() }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HistoryProps {
    api: Rc<ApiClient>,
    session: Session,
    on_back: Callback<()>,
}

#[function_component(HistoryPage)]
fn history_page(props: &HistoryProps) -> Html {
    let history = use_state(HistoryView::default);

    {
        let api = props.api.clone();
        let history = history.clone();

        use_effect_with_deps(
            move |session: &Session| {
                let user_id = session.user_id().to_string();
                spawn_local(async move {
                    let result = api.expenses(&user_id).await;
                    history.set(view::history_view(result));
                });
                || ()
            },
            props.session.clone(),
        );
    }

    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_| on_back.emit(()))
    };

    html! {
        <div class="max-w-5xl mx-auto space-y-6">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold">{"Expense History"}</h1>
                <button onclick={on_back} class="px-4 py-2 border rounded">{"Back"}</button>
            </div>
            <div class="bg-card rounded-lg border border-border overflow-hidden">
                <table class="w-full text-left border-collapse">
                    <thead class="bg-secondary border-b border-border">
                        <tr>
                            <th class="px-6 py-3 text-sm font-semibold">{"Date"}</th>
                            <th class="px-6 py-3 text-sm font-semibold">{"Category"}</th>
                            <th class="px-6 py-3 text-sm font-semibold" style="text-align:right;">{"Amount"}</th>
                        </tr>
                    </thead>
                    <tbody id="expenseTable" class="divide-y divide-border">
                        { table_body(&history.table, 3, |row| html! {
                            <tr class="text-sm">
                                <td class="px-6 py-3">{ row.date.clone() }</td>
                                <td class="px-6 py-3">{ row.category.clone() }</td>
                                <td class="px-6 py-3" style="text-align:right;">{ row.amount.clone() }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
            <p class="text-right font-bold">{"Total: "}{ CURRENCY_SYMBOL }{" "}<span id="totalAmount">{ history.total_text() }</span></p>
        </div>
    }
}

#[function_component(BudgetPage)]
fn budget_page(props: &PageProps) -> Html {
    let status = use_state(StatusLine::loading);
    let budget_input = use_state(String::new);
    let feedback = use_state(|| None::<StatusLine>);
    let saving = use_state(|| false);

    {
        let api = props.api.clone();
        let status = status.clone();

        use_effect_with_deps(
            move |session: &Session| {
                let user_id = session.user_id().to_string();
                spawn_local(async move {
                    if let Some(line) = actions::load_budget_line(&*api, &user_id).await {
                        status.set(line);
                    }
                });
                || ()
            },
            props.session.clone(),
        );
    }

    let on_save = {
        let api = props.api.clone();
        let session = props.session.clone();
        let status = status.clone();
        let budget_input = budget_input.clone();
        let feedback = feedback.clone();
        let saving = saving.clone();

        Callback::from(move |_| {
            let api = api.clone();
            let session = session.clone();
            let status = status.clone();
            let feedback = feedback.clone();
            let saving = saving.clone();
            let budget = (*budget_input).clone();

            saving.set(true);
            spawn_local(async move {
                let (line, reloaded) = actions::save_budget(&*api, &session, &budget).await;
                feedback.set(Some(line));
                if let Some(reloaded) = reloaded {
                    status.set(reloaded);
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div class="pb-4 border-b border-border">
                <h1 class="text-2xl font-bold">{"Monthly Budget"}</h1>
            </div>
            <div class="bg-card rounded-[10px] p-6 border border-border">
                <p class="text-sm text-muted-foreground mb-2">{"Status"}</p>
                <div id="budgetStatus">{ status_line(&status) }</div>
            </div>
            <div class="bg-card rounded-[10px] p-6 border border-border">
                <div class="flex gap-3">
                    <input id="budgetInput" type="number" placeholder={format!("Budget ({CURRENCY_SYMBOL})")} value={(*budget_input).clone()} oninput={{
                        let budget_input = budget_input.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            budget_input.set(input.value());
                        })
                    }} class="flex-1 p-2 border rounded" />
                    <button id="saveBudgetBtn" onclick={on_save} disabled={*saving} class="bg-[#667eea] text-white px-4 rounded">
                        { if *saving { "Saving..." } else { "Save Budget" } }
                    </button>
                </div>
                if let Some(line) = &*feedback {
                    { status_line(line) }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AuthScreenProps {
    api: Rc<ApiClient>,
    on_login: Callback<Session>,
}

#[function_component(AuthScreen)]
fn auth_screen(props: &AuthScreenProps) -> Html {
    let is_login = use_state(|| true);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let message = use_state(|| None::<StatusLine>);
    let loading = use_state(|| false);

    let on_submit = {
        let api = props.api.clone();
        let on_login = props.on_login.clone();
        let is_login = is_login.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let message = message.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let on_login = on_login.clone();
            let message = message.clone();
            let loading = loading.clone();
            let logging_in = *is_login;
            let name_val = (*name).clone();
            let email_val = (*email).clone();
            let password_val = (*password).clone();

            loading.set(true);
            message.set(None);
            spawn_local(async move {
                if logging_in {
                    let request = LoginRequest {
                        email: email_val,
                        password: password_val,
                    };
                    match actions::login(&*api, &session_store(), request).await {
                        Ok(session) => on_login.emit(session),
                        Err(err) => {
                            log::warn!("login failed: {err}");
                            message.set(Some(StatusLine::from_error(&err, "Network error")));
                        }
                    }
                } else {
                    let request = RegisterRequest {
                        name: name_val,
                        email: email_val,
                        password: password_val,
                    };
                    message.set(Some(actions::register(&*api, request).await));
                }
                loading.set(false);
            });
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let message = message.clone();
        Callback::from(move |_| {
            is_login.set(!*is_login);
            message.set(None);
        })
    };

    let text_input = |kind: &'static str, label: &'static str, handle: UseStateHandle<String>| {
        let value = (*handle).clone();
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{ label }</label>
                <input
                    type={kind}
                    class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                    value={value}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        handle.set(input.value());
                    })}
                />
            </div>
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Create account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to track your spending." } else { "Start tracking your expenses." } }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    if !*is_login {
                        { text_input("text", "Name", name.clone()) }
                    }
                    { text_input("email", "Email", email.clone()) }
                    { text_input("password", "Password", password.clone()) }

                    if let Some(line) = &*message {
                        { status_line(line) }
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if *is_login { "Login" } else { "Register" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if *is_login { "No account?" } else { "Already registered?" } }
                    <button class="ml-2 text-primary font-semibold" onclick={toggle_mode}>
                        { if *is_login { "Register" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(|| match session_store().require() {
        Ok(session) => Some(session),
        Err(err) => {
            log::info!("{err}, showing login");
            None
        }
    });
    let page = use_state(|| Page::Dashboard);
    let api = use_memo(|_| ApiClient::default(), ());

    let on_login = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |logged_in: Session| {
            session.set(Some(logged_in));
            page.set(Page::Dashboard);
        })
    };

    let on_logout = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |_| {
            session_store().clear();
            session.set(None);
            page.set(Page::Dashboard);
        })
    };

    let on_select = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let (active_page, current) = match resolve_route((*session).as_ref(), *page) {
        Route::Login => return html! { <AuthScreen api={api} on_login={on_login} /> },
        Route::Authenticated(active_page, current) => (active_page, current),
    };

    let content = match active_page {
        Page::Dashboard => html! { <DashboardPage api={api.clone()} session={current.clone()} /> },
        Page::History => {
            let on_back = {
                let on_select = on_select.clone();
                Callback::from(move |_| on_select.emit(Page::Dashboard))
            };
            html! { <HistoryPage api={api.clone()} session={current.clone()} on_back={on_back} /> }
        }
        Page::Budget => html! { <BudgetPage api={api.clone()} session={current.clone()} /> },
    };

    html! {
        <Layout user_name={current.user_name().to_string()} active_page={active_page} on_select={on_select} on_logout={on_logout}>
            { content }
        </Layout>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
fn icon_list() -> Html {
    icon_base("M8 6h13M8 12h13M8 18h13M3 6h.01M3 12h.01M3 18h.01")
}
fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(config::log_level());
    log::info!("expense tracker frontend loaded, API at {}", config::api_base_url());

    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryStore;

    #[test]
    fn pages_without_session_go_to_login() {
        for page in [Page::Dashboard, Page::History, Page::Budget] {
            assert_eq!(resolve_route(None, page), Route::Login);
        }
    }

    #[test]
    fn stored_session_opens_requested_page() {
        let session = Session::new("3", "Ravi");

        assert_eq!(
            resolve_route(Some(&session), Page::History),
            Route::Authenticated(Page::History, session.clone())
        );
    }

    #[test]
    fn logout_then_reload_lands_on_login() {
        let store = SessionStore::new(MemoryStore::default());
        store.save("3", "Ravi").unwrap();
        assert!(matches!(
            resolve_route(store.load().as_ref(), Page::Dashboard),
            Route::Authenticated(Page::Dashboard, _)
        ));

        store.clear();

        assert_eq!(resolve_route(store.load().as_ref(), Page::Budget), Route::Login);
    }
}
