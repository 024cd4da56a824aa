use crate::models::ParseFilterError;
use crate::service::table::SortError;
use crate::store::StoreError;
use axum::http::StatusCode;

/// 服务层统一错误
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invoice {0} not found")]
    InvoiceNotFound(String),
    #[error("vendor {0} not found")]
    VendorNotFound(String),
    #[error("email {0} not found")]
    EmailNotFound(String),
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] ParseFilterError),
    #[error("invalid sort: {0}")]
    Sort(#[from] SortError),
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
    #[error("an upload is already in progress")]
    UploadBusy,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::InvoiceNotFound(_)
            | DashboardError::VendorNotFound(_)
            | DashboardError::EmailNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidFilter(_) | DashboardError::Sort(_) => StatusCode::BAD_REQUEST,
            DashboardError::UploadBusy => StatusCode::CONFLICT,
            DashboardError::Export(_) | DashboardError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_http_status() {
        assert_eq!(
            DashboardError::InvoiceNotFound("INV-1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        let bad_sort: DashboardError = SortError::NotSortable("status".into()).into();
        assert_eq!(bad_sort.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad_sort.to_string(), "invalid sort: column 'status' is not sortable");
        assert_eq!(DashboardError::UploadBusy.status_code(), StatusCode::CONFLICT);
    }
}
