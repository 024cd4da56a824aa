pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod service;
pub mod store;

pub use api::{build_router, AppState};
pub use config::AppConfig;
pub use error::DashboardError;
pub use service::{DashboardService, InvoiceService, UploadTracker};
pub use store::{create_store, DataStore};
