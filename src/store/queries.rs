use crate::models::{ActivityEntry, EmailRecord, InvoiceRecord, VendorOption, VendorRecord};
use crate::store::DataStore;
use std::sync::Arc;

/// 全部发票 (共享同一个集合, 便于筛选缓存按指针判断)
pub fn list_invoices(store: &DataStore) -> Arc<Vec<InvoiceRecord>> {
    Arc::clone(&store.invoices)
}

/// 按发票号查询
pub fn get_invoice<'a>(store: &'a DataStore, invoice_id: &str) -> Option<&'a InvoiceRecord> {
    store.invoices.iter().find(|invoice| invoice.id == invoice_id)
}

/// 供应商列表 (fixture 顺序)
pub fn list_vendors(store: &DataStore) -> Vec<&VendorRecord> {
    store.vendors.values().collect()
}

pub fn get_vendor<'a>(store: &'a DataStore, vendor_id: &str) -> Option<&'a VendorRecord> {
    store.vendors.get(vendor_id)
}

/// 下拉框选项
pub fn vendor_options(store: &DataStore) -> Vec<VendorOption> {
    store.vendors.values().map(VendorOption::from).collect()
}

/// 某供应商的发票, 保持原始顺序
pub fn list_vendor_invoices(store: &DataStore, vendor_id: &str) -> Vec<InvoiceRecord> {
    store
        .invoices
        .iter()
        .filter(|invoice| invoice.vendor_id == vendor_id)
        .cloned()
        .collect()
}

pub fn list_emails(store: &DataStore) -> &[EmailRecord] {
    &store.emails
}

pub fn get_email<'a>(store: &'a DataStore, email_id: &str) -> Option<&'a EmailRecord> {
    store.emails.iter().find(|email| email.id == email_id)
}

/// 最近动态, 最多 limit 条
pub fn recent_activity(store: &DataStore, limit: usize) -> &[ActivityEntry] {
    &store.activity[..limit.min(store.activity.len())]
}
