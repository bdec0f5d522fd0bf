#![cfg(not(tarpaulin_include))]

use axum::{
    Json, Router,
    body::Bytes,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    extract::State,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::downloader;
use crate::graph;
use crate::plan;
use crate::row::MonthRow;
use crate::simulator::{simulate, Totals};

/// Shared session state: the one editable budget table.
pub struct AppState {
    table: Mutex<Vec<MonthRow>>,
}

#[derive(Serialize)]
struct TableResponse {
    rows: Vec<MonthRow>,
    totals: Totals,
}

#[derive(Serialize)]
struct SummaryResponse {
    total_yearly_expense: f64,
    semester_fee: f64,
    semester_health_insurance: f64,
    monthly_living_total: f64,
    primary_loan_usd: f64,
    primary_loan_share: f64,
    secondary_loan_usd: f64,
    secondary_loan_share: f64,
    monthly_interest_rate: f64,
    starting_balance: f64,
    totals: Totals,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: Option<String>,
}

pub async fn run(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Seed the session table from the plan constants
    let app_state = Arc::new(AppState {
        table: Mutex::new(plan::seed_table()),
    });

    // Build router
    let app = Router::new()
        .route("/", get(serve_grid))
        .route("/api/table", get(get_table).post(update_table))
        .route("/api/reset", post(reset_table))
        .route("/api/summary", get(get_summary))
        .route("/api/export", get(export_xlsx))
        .route("/api/export.csv", get(export_csv))
        .route("/api/chart/borrowed", get(chart_borrowed))
        .route("/api/chart/balance", get(chart_balance))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_grid() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

/// Re-runs the simulation over the session table and returns the annotated
/// rows. The full table is recomputed from scratch on every call.
fn annotated_table(state: &AppState) -> (Vec<MonthRow>, Totals) {
    let mut rows = state.table.lock().unwrap().clone();
    let totals = simulate(&mut rows, plan::STARTING_BALANCE);
    (rows, totals)
}

async fn get_table(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rows, totals) = annotated_table(&state);
    Json(TableResponse { rows, totals })
}

/// Replaces the session table with the grid's edited rows. Added, removed,
/// and changed rows all arrive as a full replacement; rows are re-sorted by
/// month before simulating since the recurrence is order-dependent.
async fn update_table(
    State(state): State<Arc<AppState>>,
    Json(mut rows): Json<Vec<MonthRow>>,
) -> impl IntoResponse {
    rows.sort_by_key(|r| r.month);
    log::info!("Table updated: {} rows", rows.len());

    {
        let mut table = state.table.lock().unwrap();
        *table = rows;
    }

    let (rows, totals) = annotated_table(&state);
    Json(TableResponse { rows, totals })
}

async fn reset_table(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    {
        let mut table = state.table.lock().unwrap();
        *table = plan::seed_table();
    }
    log::info!("Table reseeded from plan constants");

    let (rows, totals) = annotated_table(&state);
    Json(TableResponse { rows, totals })
}

async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (_, totals) = annotated_table(&state);

    Json(SummaryResponse {
        total_yearly_expense: plan::YEARLY_TOTAL,
        semester_fee: plan::SEMESTER_FEE,
        semester_health_insurance: plan::SEMESTER_HEALTH_INSURANCE,
        monthly_living_total: plan::MONTHLY_LIVING_TOTAL,
        primary_loan_usd: plan::PRIMARY_LOAN_USD,
        primary_loan_share: plan::PRIMARY_LOAN_SHARE,
        secondary_loan_usd: plan::SECONDARY_LOAN_USD,
        secondary_loan_share: plan::SECONDARY_LOAN_SHARE,
        monthly_interest_rate: plan::MONTHLY_INTEREST_RATE,
        starting_balance: plan::STARTING_BALANCE,
        totals,
    })
}

async fn export_xlsx(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rows, _) = annotated_table(&state);

    match downloader::to_xlsx(&rows) {
        Ok(buffer) => Response::builder()
            .status(StatusCode::OK)
            .header(
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            )
            .header(
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"grad_budget_tracker.xlsx\"",
            )
            .body(axum::body::Body::from(Bytes::from(buffer)))
            .unwrap(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "XLSX export", e),
    }
}

async fn export_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rows, _) = annotated_table(&state);

    match downloader::to_csv(&rows) {
        Ok(csv) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/csv")
            .header(
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"grad_budget_tracker.csv\"",
            )
            .body(axum::body::Body::from(csv))
            .unwrap(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "CSV export", e),
    }
}

async fn chart_borrowed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rows, _) = annotated_table(&state);
    png_response(graph::borrowed_chart(&rows), "borrowed chart")
}

async fn chart_balance(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rows, _) = annotated_table(&state);
    png_response(graph::balance_chart(&rows), "balance chart")
}

fn png_response(
    result: Result<Vec<u8>, Box<dyn std::error::Error>>,
    what: &str,
) -> Response {
    match result {
        Ok(png_data) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .header(header::CACHE_CONTROL, "no-store")
            .body(axum::body::Body::from(Bytes::from(png_data)))
            .unwrap(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, what, e),
    }
}

fn error_response(
    status: StatusCode,
    what: &str,
    error: Box<dyn std::error::Error>,
) -> Response {
    log::error!("{} failed: {}", what, error);
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_string(&ErrorResponse {
                status: "error".to_string(),
                message: Some(error.to_string()),
            })
            .unwrap(),
        ))
        .unwrap()
}
