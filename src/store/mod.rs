//! 内存数据源: 启动时由静态数据 + 固定种子生成, 之后只读

pub mod fixtures;
pub mod generator;
pub mod queries;

pub use queries::*;

use crate::models::{
    ActivityEntry, Attachment, EmailRecord, ExtractedData, InvoiceRecord, KpiData, MonthlyVolume,
    ProcessingTime, VendorRecord,
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use fixtures::InvoiceDef;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// 数据源构建失败 (静态数据格式错误)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid date '{value}' in fixture {id}: {source}")]
    InvalidDate {
        id: String,
        value: String,
        source: chrono::ParseError,
    },
    #[error("fixture {id} references unknown invoice #{idx}")]
    UnknownInvoice { id: String, idx: u32 },
}

/// 整个应用共享的只读数据
#[derive(Debug, Clone)]
pub struct DataStore {
    pub vendors: IndexMap<String, VendorRecord>,
    pub invoices: Arc<Vec<InvoiceRecord>>,
    pub emails: Vec<EmailRecord>,
    pub activity: Vec<ActivityEntry>,
    pub kpis: KpiData,
    pub monthly_volume: Vec<MonthlyVolume>,
    pub processing_time: Vec<ProcessingTime>,
}

pub fn invoice_id(idx: u32) -> String {
    format!("INV-2025-{:04}", idx)
}

pub fn po_number(idx: u32) -> String {
    format!("PO-2025-{}", 1000 + idx)
}

fn parse_date(id: &str, value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| StoreError::InvalidDate {
        id: id.to_string(),
        value: value.to_string(),
        source,
    })
}

fn parse_timestamp(id: &str, value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| StoreError::InvalidDate {
            id: id.to_string(),
            value: value.to_string(),
            source,
        })
}

fn build_vendors() -> IndexMap<String, VendorRecord> {
    fixtures::VENDORS
        .iter()
        .map(|&(id, name, email, address, phone, terms, category, spend)| {
            let vendor = VendorRecord {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                address: address.to_string(),
                phone: phone.to_string(),
                payment_terms: terms.to_string(),
                category: category.to_string(),
                total_spend: BigDecimal::from(spend),
            };
            (vendor.id.clone(), vendor)
        })
        .collect()
}

fn build_invoice(
    def: &InvoiceDef,
    vendors: &IndexMap<String, VendorRecord>,
    rng: &mut StdRng,
) -> Result<InvoiceRecord, StoreError> {
    let id = invoice_id(def.idx);
    let date = parse_date(&id, def.date)?;
    let due_date = parse_date(&id, def.due_date)?;
    let amount = BigDecimal::new(def.amount_cents.into(), 2);
    let base = date.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()).and_utc();

    let line_items = generator::generate_line_items(def.vendor_id, &amount, rng);
    let processing_steps = generator::build_steps(def.status, &base, rng);

    Ok(InvoiceRecord {
        id,
        vendor_id: def.vendor_id.to_string(),
        vendor_name: vendors.get(def.vendor_id).map(|v| v.name.clone()),
        amount,
        date,
        due_date: Some(due_date),
        status: def.status,
        source: def.source,
        po_number: Some(po_number(def.idx)),
        confidence: def.confidence_pct as f64 / 100.0,
        line_items,
        processing_steps,
    })
}

fn build_emails(invoices: &[InvoiceRecord], vendors: &IndexMap<String, VendorRecord>) -> Result<Vec<EmailRecord>, StoreError> {
    fixtures::EMAILS
        .iter()
        .map(|&(id, idx, received_at, status, attachments)| {
            let invoice_id = invoice_id(idx);
            let invoice = invoices
                .iter()
                .find(|inv| inv.id == invoice_id)
                .ok_or_else(|| StoreError::UnknownInvoice { id: id.to_string(), idx })?;
            let vendor = vendors.get(&invoice.vendor_id);
            let vendor_name = invoice.vendor_name.clone().unwrap_or_default();

            Ok(EmailRecord {
                id: id.to_string(),
                from: vendor.map(|v| v.email.clone()).unwrap_or_default(),
                from_name: vendor_name.clone(),
                subject: format!("Invoice #{} for {}", invoice.id, po_number(idx)),
                received_at: parse_timestamp(id, received_at)?,
                attachments: attachments
                    .iter()
                    .map(|&(name, size, content_type)| Attachment {
                        name: name.to_string(),
                        size: size.to_string(),
                        content_type: content_type.to_string(),
                    })
                    .collect(),
                status,
                invoice_id: invoice.id.clone(),
                confidence: invoice.confidence,
                extracted_data: ExtractedData {
                    invoice_number: invoice.id.clone(),
                    vendor: vendor_name,
                    amount: invoice.amount.clone(),
                    date: invoice.date,
                },
            })
        })
        .collect()
}

fn build_activity() -> Result<Vec<ActivityEntry>, StoreError> {
    fixtures::RECENT_ACTIVITY
        .iter()
        .map(|&(id, kind, message, timestamp)| {
            Ok(ActivityEntry {
                id: id.to_string(),
                kind,
                message: message.to_string(),
                timestamp: parse_timestamp(id, timestamp)?,
            })
        })
        .collect()
}

/// 创建数据源, 同一个 seed 生成完全相同的数据
pub fn create_store(seed: u64) -> Result<DataStore, StoreError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let vendors = build_vendors();

    let invoices = fixtures::INVOICES
        .iter()
        .map(|def| build_invoice(def, &vendors, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;
    let emails = build_emails(&invoices, &vendors)?;
    let activity = build_activity()?;

    tracing::info!(
        "Data store created: {} vendors, {} invoices, {} emails (seed={})",
        vendors.len(),
        invoices.len(),
        emails.len(),
        seed
    );

    Ok(DataStore {
        vendors,
        invoices: Arc::new(invoices),
        emails,
        activity,
        kpis: KpiData {
            total_invoices: fixtures::KPI_TOTAL_INVOICES,
            avg_processing_time: fixtures::KPI_AVG_PROCESSING_TIME,
            automation_rate: fixtures::KPI_AUTOMATION_RATE,
            pending_approvals: fixtures::KPI_PENDING_APPROVALS,
            total_spend: BigDecimal::from(fixtures::KPI_TOTAL_SPEND),
        },
        monthly_volume: fixtures::MONTHLY_VOLUME
            .iter()
            .map(|&(month, invoices, automated)| MonthlyVolume {
                month: month.to_string(),
                invoices,
                automated,
            })
            .collect(),
        processing_time: fixtures::PROCESSING_TIME_TREND
            .iter()
            .map(|&(month, time)| ProcessingTime {
                month: month.to_string(),
                time,
            })
            .collect(),
    })
}
