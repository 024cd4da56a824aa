use crate::api::AppState;
use crate::error::DashboardError;
use crate::models::VendorOption;
use crate::service::invoices::InvoiceQuery;
use crate::service::table::SortDirection;
use crate::service::totals::ReviewDraft;
use crate::store;
use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 统一响应体
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn ok<T: Serialize>(message: String, data: T) -> Response {
    let response = ApiResponse {
        success: true,
        message,
        data: Some(data),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn fail(e: DashboardError) -> Response {
    let status = e.status_code();
    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    } else {
        tracing::warn!("Request rejected: {}", e);
    }
    let response: ApiResponse<()> = ApiResponse {
        success: false,
        message: format!("Error: {}", e),
        data: None,
    };
    (status, Json(response)).into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 发票列表 (筛选 + 排序)
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceQuery>,
) -> Response {
    match state.invoices.list(&query) {
        Ok(view) => ok(
            format!("Showing {} of {} invoices", view.showing, view.total),
            view,
        ),
        Err(e) => fail(e),
    }
}

/// 导出当前视图 CSV
pub async fn export_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceQuery>,
) -> Response {
    match state.invoices.export_csv(&query) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"invoices.csv\""),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => fail(e),
    }
}

/// 发票详情
pub async fn invoice_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.invoices.detail(&id) {
        Ok(detail) => ok(format!("Invoice {}", id), detail),
        Err(e) => fail(e),
    }
}

/// 审核预览, 不保存
pub async fn review_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ReviewDraft>,
) -> Response {
    match state.invoices.review(&id, draft) {
        Ok(preview) => ok(format!("Review preview for {}", id), preview),
        Err(e) => fail(e),
    }
}

pub async fn list_vendors(State(state): State<AppState>) -> Response {
    let vendors: Vec<VendorOption> = store::vendor_options(state.invoices.store());
    ok(format!("{} vendors", vendors.len()), vendors)
}

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
}

/// 供应商门户: 资料 + 发票
pub async fn vendor_invoices(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SortQuery>,
) -> Response {
    match state
        .invoices
        .vendor_portal(&id, query.sort.as_deref(), query.dir)
    {
        Ok(view) => ok(
            format!("{} invoices for {}", view.invoice_count, view.vendor.name),
            view,
        ),
        Err(e) => fail(e),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: Option<String>,
}

/// 开始模拟上传
pub async fn start_upload(
    State(state): State<AppState>,
    body: Option<Json<UploadRequest>>,
) -> Response {
    let file_name = body.and_then(|Json(req)| req.file_name);
    match state.uploads.start(file_name) {
        Ok(upload) => ok("Upload started".to_string(), upload),
        Err(e) => fail(e),
    }
}

pub async fn upload_status(State(state): State<AppState>) -> Response {
    let upload = state.uploads.current();
    ok(format!("Upload {:?}", upload.phase), upload)
}

/// 收件箱
pub async fn list_emails(State(state): State<AppState>) -> Response {
    let inbox = state.dashboard.inbox();
    ok(
        format!(
            "{} emails, {} need review",
            inbox.stats.total, inbox.stats.needs_review
        ),
        inbox,
    )
}

pub async fn email_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.dashboard.email_detail(&id) {
        Ok(detail) => ok(format!("Email {}", id), detail),
        Err(e) => fail(e),
    }
}

/// 首页看板
pub async fn dashboard(State(state): State<AppState>) -> Response {
    ok("Dashboard".to_string(), state.dashboard.summary(&Utc::now()))
}

/// 筛选下拉框
pub async fn filter_options(State(state): State<AppState>) -> Response {
    ok("Filter options".to_string(), state.invoices.filter_options())
}
