//! 发票筛选引擎
//!
//! 四个互相独立的条件 (状态/供应商/来源/关键字) 做 AND 组合, 结果保持原始相对顺序。
//! `InvoiceFilters` 按 (数据源, 条件) 缓存结果: 输入不变时返回同一个 `Arc`。

use crate::models::{InvoiceRecord, InvoiceSource, InvoiceStatus, ParseFilterError};
use serde::Serialize;
use std::sync::Arc;

/// 筛选条件, None / 空串表示不限
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub status: Option<InvoiceStatus>,
    pub vendor_id: Option<String>,
    pub source: Option<InvoiceSource>,
    pub search: String,
}

/// 大小写不敏感的子串匹配, 字段缺失视为不匹配
fn contains_query(field: Option<&str>, query_lower: &str) -> bool {
    field
        .map(|value| value.to_lowercase().contains(query_lower))
        .unwrap_or(false)
}

impl FilterCriteria {
    /// 从查询串构建, 空串即"不限"
    pub fn from_query(
        status: Option<&str>,
        vendor: Option<&str>,
        source: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, ParseFilterError> {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }
        Ok(Self {
            status: non_empty(status).map(str::parse).transpose()?,
            vendor_id: non_empty(vendor).map(str::to_string),
            source: non_empty(source).map(str::parse).transpose()?,
            search: search.unwrap_or_default().to_string(),
        })
    }

    /// 没有任何生效条件
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.vendor_id.is_none()
            && self.source.is_none()
            && self.search.is_empty()
    }

    pub fn matches(&self, invoice: &InvoiceRecord) -> bool {
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }

        if let Some(vendor_id) = &self.vendor_id {
            if &invoice.vendor_id != vendor_id {
                return false;
            }
        }

        if let Some(source) = self.source {
            if invoice.source != source {
                return false;
            }
        }

        // 关键字: 命中 id / PO 号 / 供应商名 任一即可
        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let hit = contains_query(Some(invoice.id.as_str()), &query)
                || contains_query(invoice.po_number.as_deref(), &query)
                || contains_query(invoice.vendor_name.as_deref(), &query);
            if !hit {
                return false;
            }
        }

        true
    }
}

/// 纯函数: 返回满足全部条件的子序列
pub fn filter_invoices(invoices: &[InvoiceRecord], criteria: &FilterCriteria) -> Vec<InvoiceRecord> {
    invoices
        .iter()
        .filter(|invoice| criteria.matches(invoice))
        .cloned()
        .collect()
}

/// 带缓存的筛选状态, 生命周期跟随一个列表视图
#[derive(Debug)]
pub struct InvoiceFilters {
    source: Arc<Vec<InvoiceRecord>>,
    criteria: FilterCriteria,
    cache: Option<Arc<Vec<InvoiceRecord>>>,
}

impl InvoiceFilters {
    pub fn new(source: Arc<Vec<InvoiceRecord>>) -> Self {
        Self {
            source,
            criteria: FilterCriteria::default(),
            cache: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// 数据源总条数
    pub fn total(&self) -> usize {
        self.source.len()
    }

    /// 替换数据源, 指针相同视为未变化
    pub fn set_source(&mut self, source: Arc<Vec<InvoiceRecord>>) {
        if !Arc::ptr_eq(&self.source, &source) {
            self.source = source;
            self.cache = None;
        }
    }

    pub fn set_status_filter(&mut self, status: Option<InvoiceStatus>) {
        if self.criteria.status != status {
            self.criteria.status = status;
            self.cache = None;
        }
    }

    pub fn set_vendor_filter(&mut self, vendor_id: Option<String>) {
        if self.criteria.vendor_id != vendor_id {
            self.criteria.vendor_id = vendor_id;
            self.cache = None;
        }
    }

    pub fn set_source_filter(&mut self, source: Option<InvoiceSource>) {
        if self.criteria.source != source {
            self.criteria.source = source;
            self.cache = None;
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.criteria.search != query {
            self.criteria.search = query;
            self.cache = None;
        }
    }

    /// 当前可见子集; 输入未变时返回同一个 Arc
    pub fn filtered(&mut self) -> Arc<Vec<InvoiceRecord>> {
        if let Some(cached) = &self.cache {
            return Arc::clone(cached);
        }

        let result = Arc::new(filter_invoices(&self.source, &self.criteria));
        tracing::debug!(
            "Filtered invoices: {}/{} visible, criteria: {:?}",
            result.len(),
            self.source.len(),
            self.criteria
        );
        self.cache = Some(Arc::clone(&result));
        result
    }
}
