use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 供应商主数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub payment_terms: String,
    pub category: String,
    pub total_spend: BigDecimal,
}

/// 下拉框选项
#[derive(Debug, Clone, Serialize)]
pub struct VendorOption {
    pub id: String,
    pub name: String,
}

impl From<&VendorRecord> for VendorOption {
    fn from(vendor: &VendorRecord) -> Self {
        Self {
            id: vendor.id.clone(),
            name: vendor.name.clone(),
        }
    }
}
