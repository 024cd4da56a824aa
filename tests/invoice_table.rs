use ap_invoice_dashboard::models::{InvoiceRecord, InvoiceSource, InvoiceStatus};
use ap_invoice_dashboard::service::columns::{invoice_table, NO_INVOICES_MESSAGE};
use ap_invoice_dashboard::service::table::{
    CellValue, Column, DataTable, RowKey, SortDirection, SortIndicator, TableBody, TableRow,
};
use ap_invoice_dashboard::service::{filter_invoices, FilterCriteria, InvoiceFilters};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

fn invoice(id: &str, vendor: &str, amount: i64, status: InvoiceStatus, due_day: Option<u32>) -> InvoiceRecord {
    InvoiceRecord {
        id: id.to_string(),
        vendor_id: format!("V-{}", vendor),
        vendor_name: Some(vendor.to_string()),
        amount: BigDecimal::from(amount),
        date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        due_date: due_day.and_then(|day| NaiveDate::from_ymd_opt(2025, 2, day)),
        status,
        source: InvoiceSource::Email,
        po_number: None,
        confidence: 0.9,
        line_items: Vec::new(),
        processing_steps: Vec::new(),
    }
}

fn acme_and_globex() -> Vec<InvoiceRecord> {
    vec![
        invoice("INV-1", "Acme", 100, InvoiceStatus::Paid, Some(9)),
        invoice("INV-2", "Globex", 50, InvoiceStatus::Received, None),
    ]
}

fn keys(table: &DataTable<InvoiceRecord>, rows: &[InvoiceRecord]) -> Vec<RowKey> {
    table.render(rows).rows().iter().map(|row| row.key.clone()).collect()
}

fn id_keys(ids: &[&str]) -> Vec<RowKey> {
    ids.iter().map(|id| RowKey::Id(id.to_string())).collect()
}

#[test]
fn search_then_sort_end_to_end() {
    let invoices = acme_and_globex();

    let criteria = FilterCriteria {
        search: "acme".to_string(),
        ..FilterCriteria::default()
    };
    let visible = filter_invoices(&invoices, &criteria);
    let table = invoice_table();
    assert_eq!(keys(&table, &visible), id_keys(&["INV-1"]));

    let mut table = invoice_table();
    assert!(table.click_header("amount"));
    assert_eq!(keys(&table, &invoices), id_keys(&["INV-2", "INV-1"]));

    assert!(table.click_header("amount"));
    assert_eq!(table.sort_state().direction, SortDirection::Descending);
    assert_eq!(keys(&table, &invoices), id_keys(&["INV-1", "INV-2"]));

    // 输入顺序不变
    assert_eq!(invoices[0].id, "INV-1");
}

#[test]
fn status_filter_without_match_renders_placeholder() {
    let invoices = acme_and_globex();
    let criteria = FilterCriteria {
        status: Some(InvoiceStatus::Error),
        ..FilterCriteria::default()
    };
    let visible = filter_invoices(&invoices, &criteria);
    assert!(visible.is_empty());

    let rendered = invoice_table().render(&visible);
    match rendered.body {
        TableBody::Empty { message, col_span } => {
            assert_eq!(message, NO_INVOICES_MESSAGE);
            assert_eq!(col_span, rendered.columns.len());
        }
        TableBody::Rows { .. } => panic!("expected placeholder row"),
    }
}

#[test]
fn missing_due_date_sorts_last_both_ways() {
    let mut invoices = acme_and_globex();
    invoices.push(invoice("INV-3", "Initech", 75, InvoiceStatus::Approved, Some(1)));

    let mut table = invoice_table();
    table.click_header("dueDate");
    assert_eq!(keys(&table, &invoices), id_keys(&["INV-3", "INV-1", "INV-2"]));
    table.click_header("dueDate");
    assert_eq!(keys(&table, &invoices), id_keys(&["INV-1", "INV-3", "INV-2"]));
}

#[test]
fn non_sortable_header_is_ignored() {
    let invoices = acme_and_globex();
    let mut table = invoice_table();
    assert!(!table.click_header("status"));
    assert!(!table.sort_state().is_sorted());
    assert_eq!(keys(&table, &invoices), id_keys(&["INV-1", "INV-2"]));

    let headers = table.headers();
    let status = headers.iter().find(|h| h.key == "status").unwrap();
    assert_eq!(status.indicator, None);
    let amount = headers.iter().find(|h| h.key == "amount").unwrap();
    assert_eq!(amount.indicator, Some(SortIndicator::Neutral));
}

#[test]
fn row_click_receives_whole_row() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let mut table = invoice_table().on_row_click(move |row: &InvoiceRecord| {
        sink.lock().unwrap().push((row.id.clone(), row.amount.clone()));
    });

    let invoices = acme_and_globex();
    assert!(table.click_row(&invoices[1]));
    assert_eq!(
        clicked.lock().unwrap().as_slice(),
        [("INV-2".to_string(), BigDecimal::from(50))]
    );
}

struct Anonymous(&'static str);

impl TableRow for Anonymous {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::text(self.0),
            _ => CellValue::Null,
        }
    }
}

#[test]
fn rows_without_id_are_keyed_by_position() {
    let mut table: DataTable<Anonymous> = DataTable::new(vec![Column::new("name", "Name").sortable()]);
    table.click_header("name");
    let rendered = table.render(&[Anonymous("b"), Anonymous("a")]);
    let rows = rendered.rows();
    assert_eq!(rows[0].key, RowKey::Index(0));
    assert_eq!(rows[0].cells, ["a"]);
    assert_eq!(rows[1].key, RowKey::Index(1));
}

#[test]
fn memoized_view_tracks_criteria() {
    let source = Arc::new(acme_and_globex());
    let mut filters = InvoiceFilters::new(Arc::clone(&source));
    let all = filters.filtered();
    assert_eq!(all.len(), 2);

    filters.set_search_query("GLOBEX");
    let globex = filters.filtered();
    assert_eq!(globex.len(), 1);
    assert!(Arc::ptr_eq(&globex, &filters.filtered()));
}
