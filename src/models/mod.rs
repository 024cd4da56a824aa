pub mod dashboard;
pub mod email;
pub mod invoice;
pub mod vendor;

pub use dashboard::{
    ActivityEntry, ActivityKind, KpiData, MonthlyVolume, ProcessingTime, StatusSlice,
    VendorSpend,
};
pub use email::{Attachment, EmailRecord, EmailStatus, ExtractedData};
pub use invoice::{
    InvoiceRecord, InvoiceSource, InvoiceStatus, LineItem, ParseFilterError, ProcessingStep,
    StepStatus,
};
pub use vendor::{VendorOption, VendorRecord};
