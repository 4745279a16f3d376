//! Expense routes, including the PDF report download.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, stream::channel_body};
use econome_core::{
    expense::{ExpenseError, ExpenseInput, ExpenseRecord},
    report::ReportRenderer,
};
use econome_db::{ExpenseRepository, entities::expenses};
use econome_shared::AppError;

const REPORT_FILENAME: &str = "expense_report.pdf";
const REPORT_FAILURE: &str = "Error generating PDF report";
/// Encoded chunks buffered between the renderer and a slow client.
const REPORT_BODY_CHUNKS: usize = 8;

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expense/add", post(add_expense))
        .route("/expense/get", get(get_expenses))
        .route("/expense/downloadexcel", get(download_excel))
        .route("/expense/downloadpdf", get(download_pdf))
        .route("/expense/{id}", put(update_expense).delete(delete_expense))
}

// ============================================================================
// Response Types
// ============================================================================

/// An expense as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    /// Expense ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Category label.
    pub category: String,
    /// Amount, serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Expense date.
    pub date: DateTime<Utc>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<expenses::Model> for ExpenseResponse {
    fn from(model: expenses::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            category: model.category,
            amount: model.amount,
            date: model.date.with_timezone(&Utc),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// A failed expense request.
///
/// The status comes from the wrapped [`AppError`]; the client only sees
/// `message`. Details of server-side failures are logged.
#[derive(Debug)]
struct RouteError {
    error: AppError,
    message: String,
}

impl RouteError {
    fn internal(error: AppError, message: &str) -> Self {
        Self {
            error,
            message: message.to_string(),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            error: AppError::Validation(message.to_string()),
            message: message.to_string(),
        }
    }

    fn not_found() -> Self {
        Self {
            error: AppError::NotFound("expense".to_string()),
            message: "Expense not found".to_string(),
        }
    }
}

impl From<ExpenseError> for RouteError {
    fn from(err: ExpenseError) -> Self {
        let message = err.to_string();
        Self {
            error: AppError::Validation(message.clone()),
            message,
        }
    }
}

impl From<JsonRejection> for RouteError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected expense body");
        Self::bad_request("Invalid request body")
    }
}

impl From<PathRejection> for RouteError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected expense id");
        Self::bad_request("Invalid expense id")
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        if self.error.is_internal() {
            error!(error = %self.error, "{}", self.message);
        }
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "message": self.message }))).into_response()
    }
}

fn database_error(err: &sea_orm::DbErr, message: &str) -> RouteError {
    RouteError::internal(AppError::Database(err.to_string()), message)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /expense/add - Record a new expense.
async fn add_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseResponse>), RouteError> {
    let Json(payload) = payload?;
    let expense = payload.validate()?;
    let repo = ExpenseRepository::new(state.db.clone());

    let created = repo
        .create(auth_user.user_id(), &expense)
        .await
        .map_err(|e| database_error(&e, "Failed to add expense"))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /expense/get - List the user's expenses, newest first.
async fn get_expenses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ExpenseResponse>>, RouteError> {
    let repo = ExpenseRepository::new(state.db.clone());

    let rows = repo
        .find_by_user(auth_user.user_id())
        .await
        .map_err(|e| database_error(&e, "Failed to fetch expenses"))?;

    Ok(Json(rows.into_iter().map(ExpenseResponse::from).collect()))
}

/// PUT /expense/{id} - Replace an expense's fields.
async fn update_expense(
    State(state): State<AppState>,
    expense_id: Result<Path<Uuid>, PathRejection>,
    auth_user: AuthUser,
    payload: Result<Json<ExpenseInput>, JsonRejection>,
) -> Result<Json<ExpenseResponse>, RouteError> {
    let Path(expense_id) = expense_id?;
    let Json(payload) = payload?;
    let expense = payload.validate()?;
    let repo = ExpenseRepository::new(state.db.clone());

    let updated = repo
        .update(auth_user.user_id(), expense_id, &expense)
        .await
        .map_err(|e| database_error(&e, "Failed to update expense"))?
        .ok_or_else(RouteError::not_found)?;

    Ok(Json(updated.into()))
}

/// DELETE /expense/{id} - Remove an expense.
async fn delete_expense(
    State(state): State<AppState>,
    expense_id: Result<Path<Uuid>, PathRejection>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, RouteError> {
    let Path(expense_id) = expense_id?;
    let repo = ExpenseRepository::new(state.db.clone());

    let deleted = repo
        .delete(auth_user.user_id(), expense_id)
        .await
        .map_err(|e| database_error(&e, "Failed to delete expense"))?;

    if !deleted {
        return Err(RouteError::not_found());
    }

    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}

/// GET /expense/downloadexcel - Spreadsheet export, not implemented yet.
async fn download_excel() -> Json<serde_json::Value> {
    Json(json!({ "message": "Excel download (placeholder)" }))
}

/// GET /expense/downloadpdf - Stream the user's expenses as a PDF report.
///
/// Records are checked before the status line goes out, so every failure the
/// renderer can report still becomes a JSON error. Pages are then written to
/// the body as they are laid out.
async fn download_pdf(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let user_id = auth_user.user_id();
    let repo = ExpenseRepository::new(state.db.clone());

    let rows = match repo.find_by_user(user_id).await {
        Ok(rows) => rows,
        Err(e) => return database_error(&e, REPORT_FAILURE).into_response(),
    };
    let records: Vec<ExpenseRecord> = rows.into_iter().map(ExpenseRecord::from).collect();

    let renderer = ReportRenderer::with_format((*state.report).clone());
    let generated_at = Utc::now();
    if let Err(e) = renderer.validate(&records, generated_at) {
        return RouteError::internal(AppError::Rendering(e.to_string()), REPORT_FAILURE)
            .into_response();
    }

    let (writer, body) = channel_body(REPORT_BODY_CHUNKS);
    let abort = writer.clone();
    tokio::task::spawn_blocking(move || {
        match renderer.render_pdf_to(&records, generated_at, writer) {
            Ok(writer) => info!(
                user_id = %user_id,
                expenses = records.len(),
                bytes = writer.bytes_written(),
                "Streamed expense report"
            ),
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Expense report stream aborted");
                abort.abort(REPORT_FAILURE);
            }
        }
    });

    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={REPORT_FILENAME}"),
            ),
        ],
        body,
    )
        .into_response()
}
