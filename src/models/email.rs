use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 邮件机器人处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailStatus {
    Processed,
    Processing,
    NeedsReview,
    Error,
}

impl EmailStatus {
    /// 四段流水线 (Ingestion/Extraction/Validation/Posting) 中已完成的段数
    pub fn pipeline_progress(&self) -> usize {
        match self {
            EmailStatus::Processed => 4,
            EmailStatus::NeedsReview => 3,
            EmailStatus::Processing => 2,
            EmailStatus::Error => 1,
        }
    }

    /// 需要人工介入
    pub fn needs_attention(&self) -> bool {
        matches!(self, EmailStatus::NeedsReview | EmailStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// 从附件中"识别"出的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub invoice_number: String,
    pub vendor: String,
    pub amount: BigDecimal,
    pub date: NaiveDate,
}

/// 收件箱邮件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    pub id: String,
    pub from: String,
    pub from_name: String,
    pub subject: String,
    pub received_at: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
    pub status: EmailStatus,
    pub invoice_id: String,
    pub confidence: f64,
    pub extracted_data: ExtractedData,
}
