//! 首页看板与邮件收件箱

use crate::error::DashboardError;
use crate::format::{
    confidence_percent, format_currency, format_date_time, format_number, format_percent,
    relative_time, ConfidenceTier,
};
use crate::models::{
    ActivityEntry, EmailRecord, InvoiceRecord, InvoiceStatus, KpiData, MonthlyVolume,
    ProcessingTime, StatusSlice, VendorRecord, VendorSpend,
};
use crate::store::{self, DataStore};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// 供应商支出图展示的供应商数
pub const TOP_VENDOR_COUNT: usize = 8;

/// 邮件流水线的四段
pub const EMAIL_PIPELINE: [&str; 4] = ["Ingestion", "Extraction", "Validation", "Posting"];

/// 状态分布的扇区, extracting + validating 合并为 Processing
fn status_bucket(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Received => "Received",
        InvoiceStatus::Extracting | InvoiceStatus::Validating => "Processing",
        InvoiceStatus::Approved => "Approved",
        InvoiceStatus::Posted => "Posted",
        InvoiceStatus::Paid => "Paid",
        InvoiceStatus::Error => "Error",
    }
}

const STATUS_COLORS: [(&str, &str); 6] = [
    ("Received", "#3B82F6"),
    ("Processing", "#F59E0B"),
    ("Approved", "#8B5CF6"),
    ("Posted", "#10B981"),
    ("Paid", "#059669"),
    ("Error", "#EF4444"),
];

/// 按状态统计, 扇区顺序固定, 空扇区保留
pub fn status_distribution(invoices: &[InvoiceRecord]) -> Vec<StatusSlice> {
    let mut counts: IndexMap<&str, usize> =
        STATUS_COLORS.iter().map(|&(name, _)| (name, 0)).collect();
    for invoice in invoices {
        *counts.entry(status_bucket(invoice.status)).or_insert(0) += 1;
    }

    STATUS_COLORS
        .iter()
        .map(|&(name, color)| StatusSlice {
            name: name.to_string(),
            value: counts.get(name).copied().unwrap_or(0),
            color: color.to_string(),
        })
        .collect()
}

/// 累计支出最高的供应商, 支出相同时保持原顺序
pub fn top_vendor_spend(vendors: &[&VendorRecord], limit: usize) -> Vec<VendorSpend> {
    let mut ranked = vendors.to_vec();
    ranked.sort_by(|a, b| b.total_spend.cmp(&a.total_spend));
    ranked
        .into_iter()
        .take(limit)
        .map(|vendor| VendorSpend {
            vendor: vendor.name.clone(),
            spend: vendor.total_spend.clone(),
        })
        .collect()
}

/// KPI 卡片的展示文字
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub total_invoices: String,
    pub avg_processing_time: String,
    pub automation_rate: String,
    pub pending_approvals: String,
    pub total_spend: String,
}

impl From<&KpiData> for KpiDisplay {
    fn from(kpis: &KpiData) -> Self {
        Self {
            total_invoices: format_number(kpis.total_invoices as i64),
            avg_processing_time: format!("{} days", kpis.avg_processing_time),
            automation_rate: format_percent(kpis.automation_rate as f64),
            pending_approvals: format_number(kpis.pending_approvals as i64),
            total_spend: format_currency(&kpis.total_spend),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    #[serde(flatten)]
    pub entry: ActivityEntry,
    pub ago: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub kpis: KpiData,
    pub kpi_display: KpiDisplay,
    pub monthly_volume: Vec<MonthlyVolume>,
    pub processing_time: Vec<ProcessingTime>,
    pub vendor_spend: Vec<VendorSpend>,
    pub status_distribution: Vec<StatusSlice>,
    pub recent_activity: Vec<ActivityView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailStats {
    pub total: usize,
    pub auto_processed: usize,
    pub needs_review: usize,
}

impl EmailStats {
    pub fn from_emails(emails: &[EmailRecord]) -> Self {
        Self {
            total: emails.len(),
            auto_processed: emails
                .iter()
                .filter(|email| email.status == crate::models::EmailStatus::Processed)
                .count(),
            needs_review: emails.iter().filter(|email| email.status.needs_attention()).count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailInbox {
    pub stats: EmailStats,
    pub emails: Vec<EmailRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStage {
    pub name: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDetail {
    pub email: EmailRecord,
    pub received: String,
    pub pipeline: Vec<PipelineStage>,
    pub progress: usize,
    pub confidence_percent: u32,
    pub confidence_tier: ConfidenceTier,
}

/// 看板服务
pub struct DashboardService {
    store: Arc<DataStore>,
}

impl DashboardService {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn summary(&self, now: &DateTime<Utc>) -> DashboardSummary {
        let data: &DataStore = &self.store;
        let vendors = store::list_vendors(data);
        let summary = DashboardSummary {
            kpi_display: KpiDisplay::from(&data.kpis),
            kpis: data.kpis.clone(),
            monthly_volume: data.monthly_volume.clone(),
            processing_time: data.processing_time.clone(),
            vendor_spend: top_vendor_spend(&vendors, TOP_VENDOR_COUNT),
            status_distribution: status_distribution(&data.invoices),
            recent_activity: store::recent_activity(data, 10)
                .iter()
                .map(|entry| ActivityView {
                    ago: relative_time(&entry.timestamp, now),
                    entry: entry.clone(),
                })
                .collect(),
        };
        tracing::debug!("Dashboard summary built: {:?}", summary.status_distribution);
        summary
    }

    pub fn inbox(&self) -> EmailInbox {
        let emails = store::list_emails(&self.store);
        EmailInbox {
            stats: EmailStats::from_emails(emails),
            emails: emails.to_vec(),
        }
    }

    pub fn email_detail(&self, email_id: &str) -> Result<EmailDetail, DashboardError> {
        let email = store::get_email(&self.store, email_id)
            .ok_or_else(|| DashboardError::EmailNotFound(email_id.to_string()))?;
        let progress = email.status.pipeline_progress();

        Ok(EmailDetail {
            received: format_date_time(&email.received_at),
            pipeline: EMAIL_PIPELINE
                .iter()
                .enumerate()
                .map(|(i, &name)| PipelineStage {
                    name,
                    completed: i < progress,
                })
                .collect(),
            progress,
            confidence_percent: confidence_percent(email.confidence),
            confidence_tier: ConfidenceTier::from_score(email.confidence),
            email: email.clone(),
        })
    }
}
