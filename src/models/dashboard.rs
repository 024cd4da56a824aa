use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 首页 KPI 卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub total_invoices: u64,
    pub avg_processing_time: f64,   // 天
    pub automation_rate: u32,       // 百分比
    pub pending_approvals: u64,
    pub total_spend: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub invoices: u64,
    pub automated: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingTime {
    pub month: String,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSpend {
    pub vendor: String,
    pub spend: BigDecimal,
}

/// 状态分布饼图的一个扇区
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: usize,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    InvoiceReceived,
    InvoicePosted,
    ErrorFlagged,
    PaymentMade,
    VendorSubmitted,
}

/// 最近动态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
