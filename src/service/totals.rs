use crate::models::{InvoiceRecord, LineItem};
use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 增值税率 7%
pub fn tax_rate() -> BigDecimal {
    BigDecimal::new(7.into(), 2)
}

/// 新增明细行默认代扣税率 3%
pub fn default_wht_rate() -> BigDecimal {
    BigDecimal::from(3)
}

/// 保留两位小数, 0.005 进位 (远离零)
pub fn round2(value: &BigDecimal) -> BigDecimal {
    let half = BigDecimal::new(5.into(), 3);
    let shifted = if *value < BigDecimal::zero() {
        value - &half
    } else {
        value + &half
    };
    shifted.with_scale(2)
}

impl LineItem {
    /// 按数量和单价构建明细, total = round2(quantity * unit_price)
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: BigDecimal) -> Self {
        let total = round2(&(&unit_price * &BigDecimal::from(quantity)));
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total,
            wht_rate: None,
            wht_amount: None,
        }
    }

    /// 附加代扣税, wht_amount = round2(total * rate / 100)
    pub fn with_wht_rate(mut self, rate: BigDecimal) -> Self {
        self.wht_amount = Some(round2(&(&self.total * &rate / BigDecimal::from(100))));
        self.wht_rate = Some(rate);
        self
    }

    /// 审核页新增的空白行
    pub fn blank() -> Self {
        LineItem::new("", 1, BigDecimal::zero()).with_wht_rate(default_wht_rate())
    }

    /// total 是否与 quantity * unit_price 一致
    pub fn is_consistent(&self) -> bool {
        self.total == round2(&(&self.unit_price * &BigDecimal::from(self.quantity)))
    }
}

/// 明细行金额合计
pub fn line_items_total(items: &[LineItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + &item.total)
}

/// 代扣税合计
pub fn wht_total(items: &[LineItem]) -> BigDecimal {
    items
        .iter()
        .filter_map(|item| item.wht_amount.as_ref())
        .fold(BigDecimal::zero(), |acc, amount| acc + amount)
}

/// 发票汇总金额
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub wht_total: BigDecimal,
    pub grand_total: BigDecimal,
}

impl InvoiceTotals {
    /// 以给定小计计算: tax = round2(subtotal * 7%), grand = round2(subtotal + tax - wht)
    pub fn compute(subtotal: BigDecimal, items: &[LineItem]) -> Self {
        let tax = round2(&(&subtotal * &tax_rate()));
        let wht_total = wht_total(items);
        let grand_total = round2(&(&subtotal + &tax - &wht_total));
        Self {
            subtotal,
            tax,
            wht_total,
            grand_total,
        }
    }

    /// 详情页: 以发票金额为小计, 总额 = round2(amount + tax), 不扣代扣税
    pub fn for_invoice(invoice: &InvoiceRecord) -> Self {
        Self::compute(invoice.amount.clone(), &[])
    }
}

/// 审核页提交的明细行 (total/wht_amount 由服务端重算).
/// 缺省字段取空白行的值; 显式 `"whtRate": null` 表示不代扣
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: u32,
    pub unit_price: BigDecimal,
    pub wht_rate: Option<BigDecimal>,
}

impl Default for LineItemInput {
    fn default() -> Self {
        let blank = LineItem::blank();
        Self {
            description: blank.description,
            quantity: blank.quantity,
            unit_price: blank.unit_price,
            wht_rate: blank.wht_rate,
        }
    }
}

impl From<LineItemInput> for LineItem {
    fn from(input: LineItemInput) -> Self {
        let item = LineItem::new(input.description, input.quantity, input.unit_price);
        match input.wht_rate {
            Some(rate) => item.with_wht_rate(rate),
            None => item,
        }
    }
}

/// 审核页编辑稿, 未提供的字段沿用原发票
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub vendor_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub po_number: Option<String>,
    pub line_items: Option<Vec<LineItemInput>>,
}

/// 审核预览结果, 不落库
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPreview {
    pub invoice: InvoiceRecord,
    pub totals: InvoiceTotals,
}

impl ReviewDraft {
    /// 合并编辑稿并重算金额, amount 取明细合计
    pub fn apply(self, original: &InvoiceRecord) -> ReviewPreview {
        let mut invoice = original.clone();
        if let Some(vendor_name) = self.vendor_name {
            invoice.vendor_name = Some(vendor_name);
        }
        if let Some(date) = self.date {
            invoice.date = date;
        }
        if self.due_date.is_some() {
            invoice.due_date = self.due_date;
        }
        if self.po_number.is_some() {
            invoice.po_number = self.po_number;
        }
        if let Some(items) = self.line_items {
            invoice.line_items = items.into_iter().map(LineItem::from).collect();
        }

        let subtotal = line_items_total(&invoice.line_items);
        invoice.amount = subtotal.clone();
        let totals = InvoiceTotals::compute(subtotal, &invoice.line_items);
        ReviewPreview { invoice, totals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceSource, InvoiceStatus};
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn invoice_with(items: Vec<LineItem>, amount: &str) -> InvoiceRecord {
        InvoiceRecord {
            id: "INV-2025-0001".to_string(),
            vendor_id: "V001".to_string(),
            vendor_name: Some("Acme Supplies Co.".to_string()),
            amount: dec(amount),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 9),
            status: InvoiceStatus::Received,
            source: InvoiceSource::Email,
            po_number: Some("PO-2025-1001".to_string()),
            confidence: 0.94,
            line_items: items,
            processing_steps: Vec::new(),
        }
    }

    #[test]
    fn round2_carries_half_cents_away_from_zero() {
        assert_eq!(round2(&dec("1.005")), dec("1.01"));
        assert_eq!(round2(&dec("1.004")), dec("1.00"));
        assert_eq!(round2(&dec("-1.005")), dec("-1.01"));
        assert_eq!(round2(&dec("12")).to_string(), "12.00");
    }

    #[test]
    fn line_total_is_quantity_times_unit_price() {
        let item = LineItem::new("Copy Paper, 10-Ream Case", 7, dec("54.99"));
        assert_eq!(item.total, dec("384.93"));
        assert!(item.is_consistent());

        let energy = LineItem::new("Electricity — Peak Usage (kWh)", 3, dec("0.12"));
        assert_eq!(energy.total, dec("0.36"));
    }

    #[test]
    fn wht_amount_follows_rate() {
        let item = LineItem::new("IT Consulting — Per Diem", 3, dec("1800")).with_wht_rate(dec("3"));
        assert_eq!(item.wht_amount, Some(dec("162.00")));

    }

    #[test]
    fn submitted_row_defaults_to_blank_line() {
        let input: LineItemInput = serde_json::from_str(r#"{"description":"Toner"}"#).unwrap();
        assert_eq!(input.quantity, 1);
        assert_eq!(input.unit_price, dec("0"));
        assert_eq!(input.wht_rate, Some(dec("3")));

        let item = LineItem::from(input);
        assert_eq!(item.description, "Toner");
        assert_eq!(item.total, dec("0"));
        assert_eq!(item.wht_amount, Some(dec("0")));

        let no_wht: LineItemInput =
            serde_json::from_str(r#"{"description":"Toner","quantity":2,"unitPrice":"5","whtRate":null}"#)
                .unwrap();
        assert_eq!(LineItem::from(no_wht).wht_amount, None);
    }

    #[test]
    fn detail_totals_add_seven_percent_tax() {
        let invoice = invoice_with(Vec::new(), "4250.00");
        let totals = InvoiceTotals::for_invoice(&invoice);
        assert_eq!(totals.tax, dec("297.50"));
        assert_eq!(totals.grand_total, dec("4547.50"));
        assert_eq!(totals.wht_total, dec("0"));
    }

    #[test]
    fn detail_totals_ignore_line_item_withholding() {
        let items = vec![
            LineItem::new("IT Consulting", 2, dec("1000")).with_wht_rate(dec("3")),
            LineItem::new("Travel", 1, dec("250")).with_wht_rate(dec("3")),
        ];
        let invoice = invoice_with(items, "2250.00");
        let totals = InvoiceTotals::for_invoice(&invoice);
        assert_eq!(totals.subtotal, dec("2250.00"));
        assert_eq!(totals.tax, dec("157.50"));
        assert_eq!(totals.wht_total, dec("0"));
        assert_eq!(totals.grand_total, dec("2407.50"));
    }

    #[test]
    fn review_recomputes_amount_from_line_items() {
        let invoice = invoice_with(vec![LineItem::new("Desk Organizer Set", 10, dec("45"))], "450");
        let draft = ReviewDraft {
            po_number: Some("PO-2025-9999".to_string()),
            line_items: Some(vec![
                LineItemInput {
                    description: "Desk Organizer Set".to_string(),
                    quantity: 4,
                    unit_price: dec("45.00"),
                    wht_rate: Some(dec("3")),
                },
                LineItemInput {
                    description: "Sticky Notes, 12-Pack".to_string(),
                    quantity: 2,
                    unit_price: dec("12.75"),
                    wht_rate: None,
                },
            ]),
            ..ReviewDraft::default()
        };

        let preview = draft.apply(&invoice);
        // 180.00 + 25.50
        assert_eq!(preview.invoice.amount, dec("205.50"));
        assert_eq!(preview.invoice.po_number.as_deref(), Some("PO-2025-9999"));
        assert_eq!(preview.totals.tax, dec("14.39"));
        assert_eq!(preview.totals.wht_total, dec("5.40"));
        assert_eq!(preview.totals.grand_total, dec("214.49"));
        // 原发票不受影响
        assert_eq!(invoice.amount, dec("450"));
    }
}
