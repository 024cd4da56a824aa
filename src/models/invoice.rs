use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 发票处理状态 (封闭枚举)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Received,
    Extracting,
    Validating,
    Approved,
    Posted,
    Paid,
    Error,
}

impl InvoiceStatus {
    /// 下拉框顺序
    pub const ALL: [InvoiceStatus; 7] = [
        InvoiceStatus::Received,
        InvoiceStatus::Extracting,
        InvoiceStatus::Validating,
        InvoiceStatus::Approved,
        InvoiceStatus::Posted,
        InvoiceStatus::Paid,
        InvoiceStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Received => "received",
            InvoiceStatus::Extracting => "extracting",
            InvoiceStatus::Validating => "validating",
            InvoiceStatus::Approved => "approved",
            InvoiceStatus::Posted => "posted",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Error => "error",
        }
    }

    /// 该状态下已经走过的处理步骤数 (Error 单独处理)
    pub fn completed_steps(&self) -> Option<usize> {
        match self {
            InvoiceStatus::Received => Some(1),
            InvoiceStatus::Extracting => Some(2),
            InvoiceStatus::Validating => Some(3),
            InvoiceStatus::Approved => Some(4),
            InvoiceStatus::Posted => Some(5),
            InvoiceStatus::Paid => Some(6),
            InvoiceStatus::Error => None,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseFilterError::UnknownStatus(s.to_string()))
    }
}

/// 发票来源渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceSource {
    Email,
    Portal,
}

impl InvoiceSource {
    pub const ALL: [InvoiceSource; 2] = [InvoiceSource::Email, InvoiceSource::Portal];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceSource::Email => "email",
            InvoiceSource::Portal => "portal",
        }
    }
}

impl fmt::Display for InvoiceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceSource {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(InvoiceSource::Email),
            "portal" => Ok(InvoiceSource::Portal),
            other => Err(ParseFilterError::UnknownSource(other.to_string())),
        }
    }
}

/// 查询参数无法映射到封闭枚举
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFilterError {
    #[error("unknown invoice status '{0}'")]
    UnknownStatus(String),
    #[error("unknown invoice source '{0}'")]
    UnknownSource(String),
}

/// 发票明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
    pub total: BigDecimal,   // round2(quantity * unit_price)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wht_rate: Option<BigDecimal>,   // 代扣税率 (百分比)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wht_amount: Option<BigDecimal>,
}

/// 处理步骤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Completed,
    InProgress,
    Error,
    Pending,
}

/// 时间线事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStep {
    pub step: String,
    pub status: StepStatus,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

/// 发票记录 (数据源所有, 核心只读)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub vendor_id: String,
    pub vendor_name: Option<String>,   // 供应商名称冗余副本
    pub amount: BigDecimal,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub source: InvoiceSource,
    pub po_number: Option<String>,
    pub confidence: f64,   // [0, 1]
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub processing_steps: Vec<ProcessingStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>(), Ok(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(
            "shipped".parse::<InvoiceStatus>(),
            Err(ParseFilterError::UnknownStatus("shipped".to_string()))
        );
        assert!("fax".parse::<InvoiceSource>().is_err());
    }

    #[test]
    fn step_status_uses_kebab_case() {
        let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
