pub mod columns;
pub mod dashboard;
pub mod filter;
pub mod invoices;
pub mod table;
pub mod totals;
pub mod upload;

pub use dashboard::DashboardService;
pub use filter::{filter_invoices, FilterCriteria, InvoiceFilters};
pub use invoices::{InvoiceQuery, InvoiceService};
pub use table::{Column, DataTable, SortDirection, SortState, TableRow};
pub use upload::{UploadTiming, UploadTracker};
