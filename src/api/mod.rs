pub mod handlers;

pub use handlers::*;

use crate::service::{DashboardService, InvoiceService, UploadTiming, UploadTracker};
use crate::store::DataStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub invoices: Arc<InvoiceService>,
    pub dashboard: Arc<DashboardService>,
    pub uploads: Arc<UploadTracker>,
}

impl AppState {
    pub fn new(store: Arc<DataStore>, timing: UploadTiming) -> Self {
        Self {
            invoices: Arc::new(InvoiceService::new(Arc::clone(&store))),
            dashboard: Arc::new(DashboardService::new(store)),
            uploads: Arc::new(UploadTracker::new(timing)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/invoices", get(list_invoices))
        .route("/api/invoices/export.csv", get(export_invoices))
        .route("/api/invoices/:id", get(invoice_detail))
        .route("/api/invoices/:id/review", post(review_invoice))
        .route("/api/vendors", get(list_vendors))
        .route("/api/vendors/:id/invoices", get(vendor_invoices))
        .route("/api/uploads", get(upload_status).post(start_upload))
        .route("/api/emails", get(list_emails))
        .route("/api/emails/:id", get(email_detail))
        .route("/api/dashboard", get(dashboard))
        .route("/api/filters/options", get(filter_options))
        .layer(ServiceBuilder::new())
        .with_state(state)
}
