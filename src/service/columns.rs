use crate::format::{confidence_percent, format_currency, format_date};
use crate::models::{InvoiceRecord, InvoiceSource, InvoiceStatus};
use crate::service::table::{CellValue, Column, DataTable, TableRow};

pub const NO_INVOICES_MESSAGE: &str = "No invoices match your filters.";

impl TableRow for InvoiceRecord {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => CellValue::text(self.id.as_str()),
            "vendorId" => CellValue::text(self.vendor_id.as_str()),
            "vendorName" => CellValue::from_option(self.vendor_name.as_deref()),
            "amount" => CellValue::Decimal(self.amount.clone()),
            "date" => CellValue::text(self.date.to_string()),
            "dueDate" => CellValue::from_option(self.due_date.map(|d| d.to_string())),
            "status" => CellValue::text(self.status.as_str()),
            "source" => CellValue::text(self.source.as_str()),
            "poNumber" => CellValue::from_option(self.po_number.as_deref()),
            "confidence" => CellValue::Float(self.confidence),
            _ => CellValue::Null,
        }
    }

    fn row_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// 状态徽标文字
pub fn status_label(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Received => "Received",
        InvoiceStatus::Extracting => "Extracting",
        InvoiceStatus::Validating => "Validating",
        InvoiceStatus::Approved => "Approved",
        InvoiceStatus::Posted => "Posted",
        InvoiceStatus::Paid => "Paid",
        InvoiceStatus::Error => "Error",
    }
}

pub fn source_label(source: InvoiceSource) -> &'static str {
    match source {
        InvoiceSource::Email => "Email",
        InvoiceSource::Portal => "Vendor Portal",
    }
}

fn amount_column() -> Column<InvoiceRecord> {
    Column::new("amount", "Amount")
        .sortable()
        .format(|_, invoice: &InvoiceRecord| format_currency(&invoice.amount))
}

fn date_column() -> Column<InvoiceRecord> {
    Column::new("date", "Date")
        .sortable()
        .format(|_, invoice: &InvoiceRecord| format_date(&invoice.date))
}

fn due_date_column() -> Column<InvoiceRecord> {
    Column::new("dueDate", "Due Date")
        .sortable()
        .format(|_, invoice: &InvoiceRecord| {
            invoice.due_date.as_ref().map(format_date).unwrap_or_default()
        })
}

fn status_column() -> Column<InvoiceRecord> {
    Column::new("status", "Status")
        .format(|_, invoice: &InvoiceRecord| status_label(invoice.status).to_string())
}

/// 发票列表页的列
pub fn invoice_columns() -> Vec<Column<InvoiceRecord>> {
    vec![
        Column::new("id", "Invoice #").sortable(),
        Column::new("vendorName", "Vendor").sortable(),
        amount_column(),
        date_column(),
        due_date_column(),
        status_column(),
        Column::new("source", "Source")
            .format(|_, invoice: &InvoiceRecord| source_label(invoice.source).to_string()),
        Column::new("confidence", "Confidence").format(|_, invoice: &InvoiceRecord| {
            format!("{}%", confidence_percent(invoice.confidence))
        }),
    ]
}

pub fn invoice_table() -> DataTable<InvoiceRecord> {
    DataTable::new(invoice_columns()).with_empty_message(NO_INVOICES_MESSAGE)
}

/// 供应商门户 "我的发票"
pub fn vendor_invoice_table() -> DataTable<InvoiceRecord> {
    DataTable::new(vec![
        Column::new("id", "Invoice #").sortable(),
        amount_column(),
        date_column(),
        status_column(),
        due_date_column(),
    ])
    .with_empty_message(NO_INVOICES_MESSAGE)
}
