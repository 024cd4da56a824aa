use crate::error::DashboardError;
use crate::format::{confidence_percent, ConfidenceTier};
use crate::models::{InvoiceRecord, InvoiceSource, InvoiceStatus, VendorOption, VendorRecord};
use crate::service::columns::{invoice_table, vendor_invoice_table};
use crate::service::filter::{FilterCriteria, InvoiceFilters};
use crate::service::table::{DataTable, RenderedTable, SortDirection, SortState};
use crate::service::totals::{line_items_total, InvoiceTotals, ReviewDraft, ReviewPreview};
use crate::store::{self, DataStore};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 列表查询参数 (全部可选, 空串视为不限)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceQuery {
    pub status: Option<String>,
    pub vendor: Option<String>,
    pub source: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
}

/// 发票列表视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListView {
    pub table: RenderedTable,
    pub showing: usize,
    pub total: usize,
    pub criteria: FilterCriteria,
    pub sort: SortState,
}

/// 发票详情
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    pub invoice: InvoiceRecord,
    pub totals: InvoiceTotals,
    pub line_items_total: BigDecimal,
    pub confidence_percent: u32,
    pub confidence_tier: ConfidenceTier,
    pub confidence_color: &'static str,
}

/// 供应商门户: 资料 + 我的发票
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPortalView {
    pub vendor: VendorRecord,
    pub invoice_count: usize,
    pub table: RenderedTable,
    pub sort: SortState,
}

/// 筛选下拉框选项
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub statuses: Vec<InvoiceStatus>,
    pub sources: Vec<InvoiceSource>,
    pub vendors: Vec<VendorOption>,
}

fn apply_sort<R: crate::service::table::TableRow>(
    table: &mut DataTable<R>,
    sort: Option<&str>,
    dir: Option<SortDirection>,
) -> Result<(), DashboardError> {
    if let Some(key) = sort.filter(|key| !key.is_empty()) {
        table.sort_by(key, dir.unwrap_or_default())?;
    }
    Ok(())
}

/// 发票服务
pub struct InvoiceService {
    store: Arc<DataStore>,
    filters: Mutex<InvoiceFilters>,
}

impl InvoiceService {
    pub fn new(store: Arc<DataStore>) -> Self {
        let filters = InvoiceFilters::new(store::list_invoices(&store));
        Self {
            store,
            filters: Mutex::new(filters),
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// 套用查询条件, 条件与上次相同时复用缓存的结果
    fn visible(&self, criteria: &FilterCriteria) -> (Arc<Vec<InvoiceRecord>>, usize) {
        let mut filters = self.filters.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        filters.set_source(store::list_invoices(&self.store));
        filters.set_status_filter(criteria.status);
        filters.set_vendor_filter(criteria.vendor_id.clone());
        filters.set_source_filter(criteria.source);
        filters.set_search_query(criteria.search.clone());
        (filters.filtered(), filters.total())
    }

    fn prepare(
        &self,
        query: &InvoiceQuery,
    ) -> Result<(DataTable<InvoiceRecord>, FilterCriteria, Arc<Vec<InvoiceRecord>>, usize), DashboardError> {
        let criteria = FilterCriteria::from_query(
            query.status.as_deref(),
            query.vendor.as_deref(),
            query.source.as_deref(),
            query.q.as_deref(),
        )?;
        let mut table = invoice_table();
        apply_sort(&mut table, query.sort.as_deref(), query.dir)?;
        let (visible, total) = self.visible(&criteria);
        Ok((table, criteria, visible, total))
    }

    /// 列表页: 筛选 -> 排序 -> 渲染
    pub fn list(&self, query: &InvoiceQuery) -> Result<InvoiceListView, DashboardError> {
        let (table, criteria, visible, total) = self.prepare(query)?;
        let rendered = table.render(&visible);
        tracing::info!(
            "Invoice list: showing {} of {}, sort: {:?}",
            visible.len(),
            total,
            table.sort_state()
        );

        Ok(InvoiceListView {
            table: rendered,
            showing: visible.len(),
            total,
            criteria,
            sort: table.sort_state().clone(),
        })
    }

    /// 导出当前视图为 CSV
    pub fn export_csv(&self, query: &InvoiceQuery) -> Result<Vec<u8>, DashboardError> {
        let (table, _, visible, _) = self.prepare(query)?;
        let bytes = table.render_csv(&visible)?;
        tracing::info!("Exported {} invoices as CSV ({} bytes)", visible.len(), bytes.len());
        Ok(bytes)
    }

    pub fn detail(&self, invoice_id: &str) -> Result<InvoiceDetail, DashboardError> {
        let invoice = store::get_invoice(&self.store, invoice_id)
            .ok_or_else(|| DashboardError::InvoiceNotFound(invoice_id.to_string()))?;
        let tier = ConfidenceTier::from_score(invoice.confidence);

        Ok(InvoiceDetail {
            totals: InvoiceTotals::for_invoice(invoice),
            line_items_total: line_items_total(&invoice.line_items),
            confidence_percent: confidence_percent(invoice.confidence),
            confidence_tier: tier,
            confidence_color: tier.color(),
            invoice: invoice.clone(),
        })
    }

    /// 审核页预览: 合并编辑稿并重算, 不保存
    pub fn review(&self, invoice_id: &str, draft: ReviewDraft) -> Result<ReviewPreview, DashboardError> {
        let invoice = store::get_invoice(&self.store, invoice_id)
            .ok_or_else(|| DashboardError::InvoiceNotFound(invoice_id.to_string()))?;
        let preview = draft.apply(invoice);
        tracing::info!(
            "Review preview for {}: {} line items, grand total {}",
            invoice_id,
            preview.invoice.line_items.len(),
            preview.totals.grand_total
        );
        Ok(preview)
    }

    pub fn vendor_portal(
        &self,
        vendor_id: &str,
        sort: Option<&str>,
        dir: Option<SortDirection>,
    ) -> Result<VendorPortalView, DashboardError> {
        let vendor = store::get_vendor(&self.store, vendor_id)
            .ok_or_else(|| DashboardError::VendorNotFound(vendor_id.to_string()))?;
        let invoices = store::list_vendor_invoices(&self.store, vendor_id);

        let mut table = vendor_invoice_table();
        apply_sort(&mut table, sort, dir)?;

        Ok(VendorPortalView {
            vendor: vendor.clone(),
            invoice_count: invoices.len(),
            table: table.render(&invoices),
            sort: table.sort_state().clone(),
        })
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            statuses: InvoiceStatus::ALL.to_vec(),
            sources: InvoiceSource::ALL.to_vec(),
            vendors: store::vendor_options(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParseFilterError;
    use crate::service::table::{RowKey, SortError};
    use crate::store::create_store;

    fn service() -> InvoiceService {
        InvoiceService::new(Arc::new(create_store(42).unwrap()))
    }

    fn row_ids(view: &InvoiceListView) -> Vec<String> {
        view.table
            .rows()
            .iter()
            .map(|row| match &row.key {
                RowKey::Id(id) => id.clone(),
                RowKey::Index(i) => i.to_string(),
            })
            .collect()
    }

    #[test]
    fn unfiltered_list_shows_everything_in_order() {
        let view = service().list(&InvoiceQuery::default()).unwrap();
        assert_eq!(view.showing, 50);
        assert_eq!(view.total, 50);
        assert_eq!(row_ids(&view)[0], "INV-2025-0001");
        assert!(!view.sort.is_sorted());
    }

    #[test]
    fn filters_and_sorts_together() {
        let query = InvoiceQuery {
            vendor: Some("V007".into()),
            sort: Some("amount".into()),
            dir: Some(SortDirection::Descending),
            ..InvoiceQuery::default()
        };
        let view = service().list(&query).unwrap();
        assert_eq!(
            row_ids(&view),
            ["INV-2025-0025", "INV-2025-0037", "INV-2025-0004", "INV-2025-0050"]
        );
        assert_eq!(view.showing, 4);
        assert_eq!(view.sort.key.as_deref(), Some("amount"));
    }

    #[test]
    fn unknown_filter_or_sort_is_rejected() {
        let svc = service();
        let bad_status = InvoiceQuery {
            status: Some("lost".into()),
            ..InvoiceQuery::default()
        };
        assert!(matches!(
            svc.list(&bad_status),
            Err(DashboardError::InvalidFilter(ParseFilterError::UnknownStatus(_)))
        ));

        let bad_sort = InvoiceQuery {
            sort: Some("status".into()),
            ..InvoiceQuery::default()
        };
        assert!(matches!(
            svc.list(&bad_sort),
            Err(DashboardError::Sort(SortError::NotSortable(_)))
        ));
    }

    #[test]
    fn repeated_query_reuses_filtered_collection() {
        let svc = service();
        let criteria = FilterCriteria {
            status: Some(InvoiceStatus::Paid),
            ..FilterCriteria::default()
        };
        let (first, _) = svc.visible(&criteria);
        let (second, _) = svc.visible(&criteria);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn no_match_renders_placeholder() {
        let query = InvoiceQuery {
            q: Some("no-such-invoice".into()),
            ..InvoiceQuery::default()
        };
        let view = service().list(&query).unwrap();
        assert_eq!(view.showing, 0);
        assert!(view.table.is_empty());
    }

    #[test]
    fn detail_includes_tax_and_tier() {
        let detail = service().detail("INV-2025-0004").unwrap();
        assert_eq!(detail.totals.subtotal, BigDecimal::new(187550.into(), 2));
        assert_eq!(detail.totals.tax, BigDecimal::new(13129.into(), 2));
        assert_eq!(detail.confidence_percent, 96);
        assert_eq!(detail.confidence_tier, ConfidenceTier::High);
        assert!(matches!(
            service().detail("INV-0"),
            Err(DashboardError::InvoiceNotFound(_))
        ));
    }

    #[test]
    fn export_has_header_and_rows() {
        let query = InvoiceQuery {
            status: Some("error".into()),
            ..InvoiceQuery::default()
        };
        let csv = String::from_utf8(service().export_csv(&query).unwrap()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Invoice #,Vendor,Amount"));
    }

    #[test]
    fn vendor_portal_lists_only_that_vendor() {
        let view = service().vendor_portal("V010", Some("date"), None).unwrap();
        assert_eq!(view.vendor.name, "Frontier Chemical Supply");
        assert_eq!(view.invoice_count, 4);
        assert_eq!(view.table.columns.len(), 5);
        assert!(matches!(
            service().vendor_portal("V404", None, None),
            Err(DashboardError::VendorNotFound(_))
        ));
    }
}
