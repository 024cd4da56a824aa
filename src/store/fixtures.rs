//! 演示用静态数据

use crate::models::{ActivityKind, EmailStatus, InvoiceSource, InvoiceStatus};

/// (id, 名称, 邮箱, 地址, 电话, 账期, 类别, 累计支出 美元)
pub type VendorRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
);

pub const VENDORS: &[VendorRow] = &[
    ("V001", "Acme Supplies Co.", "invoices@acmesupplies.com", "1200 Commerce Blvd, Suite 400, Dallas, TX 75201", "(214) 555-0190", "Net 30", "Office Supplies", 387250),
    ("V002", "Global Tech Solutions", "billing@globaltechsol.com", "800 Innovation Dr, San Jose, CA 95110", "(408) 555-0234", "Net 45", "IT Services", 524800),
    ("V003", "Pacific Trading Ltd.", "accounts@pacifictrading.com", "3500 Harbor Way, Long Beach, CA 90802", "(562) 555-0178", "Net 30", "Raw Materials", 412600),
    ("V004", "Metro Industrial Corp.", "ap@metroindustrial.com", "2100 Factory Rd, Detroit, MI 48201", "(313) 555-0145", "Net 60", "Manufacturing", 298450),
    ("V005", "Summit Materials Inc.", "invoicing@summitmaterials.com", "950 Mountain View Ave, Denver, CO 80202", "(303) 555-0112", "Net 30", "Raw Materials", 356900),
    ("V006", "Precision Parts Mfg.", "billing@precisionparts.com", "4400 Industrial Pkwy, Cleveland, OH 44114", "(216) 555-0167", "Net 45", "Manufacturing", 189750),
    ("V007", "Elite Office Solutions", "accounts@eliteoffice.com", "600 Corporate Center, Atlanta, GA 30301", "(404) 555-0198", "Net 30", "Office Supplies", 142300),
    ("V008", "Coastal Logistics Group", "invoices@coastallogistics.com", "1800 Port Authority Blvd, Houston, TX 77001", "(713) 555-0156", "Net 45", "Logistics", 267400),
    ("V009", "Pinnacle Energy Services", "billing@pinnacleenergy.com", "700 Energy Plaza, Oklahoma City, OK 73102", "(405) 555-0189", "Net 60", "Energy", 198550),
    ("V010", "Frontier Chemical Supply", "ap@frontierchemical.com", "3200 Chemical Ln, Baton Rouge, LA 70801", "(225) 555-0134", "Net 30", "Chemicals", 69500),
];

/// 发票定义: 序号, 供应商, 金额(分), 开票日, 到期日, 状态, 来源, 置信度(百分比)。
/// 发票号 INV-2025-{序号:04}, PO 号 PO-2025-{1000+序号}
pub struct InvoiceDef {
    pub idx: u32,
    pub vendor_id: &'static str,
    pub amount_cents: i64,
    pub date: &'static str,
    pub due_date: &'static str,
    pub status: InvoiceStatus,
    pub source: InvoiceSource,
    pub confidence_pct: u32,
}

const fn def(
    idx: u32,
    vendor_id: &'static str,
    amount_cents: i64,
    date: &'static str,
    due_date: &'static str,
    status: InvoiceStatus,
    source: InvoiceSource,
    confidence_pct: u32,
) -> InvoiceDef {
    InvoiceDef {
        idx,
        vendor_id,
        amount_cents,
        date,
        due_date,
        status,
        source,
        confidence_pct,
    }
}

use InvoiceSource::{Email as E, Portal as P};
use InvoiceStatus::{
    Approved as AP, Error as ER, Extracting as EX, Paid as PD, Posted as PS, Received as RC,
    Validating as VA,
};

pub const INVOICES: &[InvoiceDef] = &[
    // received
    def(1, "V001", 425000, "2025-01-10", "2025-02-09", RC, E, 94),
    def(2, "V003", 1875000, "2025-01-12", "2025-02-11", RC, P, 97),
    def(3, "V005", 3210000, "2025-01-14", "2025-02-13", RC, E, 91),
    def(4, "V007", 187550, "2025-01-15", "2025-02-14", RC, E, 96),
    def(5, "V002", 6750000, "2025-01-16", "2025-03-02", RC, P, 93),
    def(6, "V008", 1240000, "2025-01-17", "2025-03-03", RC, E, 88),
    def(7, "V010", 560000, "2025-01-18", "2025-02-17", RC, E, 95),
    def(8, "V004", 2890000, "2025-01-19", "2025-03-20", RC, P, 92),
    // extracting
    def(9, "V002", 4520000, "2025-01-08", "2025-02-22", EX, E, 89),
    def(10, "V006", 875000, "2025-01-09", "2025-02-23", EX, P, 93),
    def(11, "V001", 315000, "2025-01-10", "2025-02-09", EX, E, 87),
    def(12, "V009", 2260000, "2025-01-11", "2025-03-12", EX, E, 91),
    def(13, "V003", 1430000, "2025-01-12", "2025-02-11", EX, P, 96),
    def(14, "V005", 5175000, "2025-01-13", "2025-02-12", EX, E, 90),
    // validating
    def(15, "V004", 3780000, "2025-01-05", "2025-03-06", VA, P, 94),
    def(16, "V008", 920000, "2025-01-06", "2025-02-20", VA, E, 97),
    def(17, "V001", 647500, "2025-01-07", "2025-02-06", VA, E, 92),
    def(18, "V010", 1125000, "2025-01-08", "2025-02-07", VA, P, 95),
    def(19, "V006", 1560000, "2025-01-09", "2025-02-23", VA, E, 88),
    def(20, "V002", 8950000, "2025-01-10", "2025-02-24", VA, P, 99),
    // approved
    def(21, "V003", 2435000, "2024-12-20", "2025-01-19", AP, E, 96),
    def(22, "V005", 4120000, "2024-12-22", "2025-01-21", AP, P, 98),
    def(23, "V009", 1785000, "2024-12-23", "2025-02-21", AP, E, 93),
    def(24, "V001", 298000, "2024-12-25", "2025-01-24", AP, E, 97),
    def(25, "V007", 564000, "2024-12-26", "2025-01-25", AP, P, 95),
    def(26, "V004", 6270000, "2024-12-28", "2025-02-26", AP, E, 91),
    def(27, "V008", 835000, "2024-12-29", "2025-02-12", AP, P, 94),
    def(28, "V002", 13450000, "2024-12-30", "2025-02-13", AP, E, 99),
    // posted
    def(29, "V005", 2760000, "2024-11-15", "2024-12-15", PS, P, 96),
    def(30, "V001", 789000, "2024-11-18", "2024-12-18", PS, E, 93),
    def(31, "V003", 5620000, "2024-11-20", "2024-12-20", PS, E, 98),
    def(32, "V006", 1345000, "2024-11-22", "2025-01-06", PS, P, 95),
    def(33, "V009", 3120000, "2024-11-25", "2025-01-24", PS, E, 92),
    def(34, "V002", 7840000, "2024-11-27", "2025-01-11", PS, P, 97),
    def(35, "V004", 1985000, "2024-11-28", "2025-01-27", PS, E, 94),
    def(36, "V008", 4230000, "2024-11-30", "2025-01-14", PS, P, 91),
    def(37, "V007", 325000, "2024-12-02", "2025-01-01", PS, E, 96),
    def(38, "V010", 1670000, "2024-12-04", "2025-01-03", PS, E, 90),
    // paid
    def(39, "V001", 543000, "2024-09-10", "2024-10-10", PD, E, 97),
    def(40, "V002", 9230000, "2024-09-15", "2024-10-30", PD, P, 99),
    def(41, "V003", 3450000, "2024-09-20", "2024-10-20", PD, E, 95),
    def(42, "V005", 6780000, "2024-10-01", "2024-10-31", PD, P, 98),
    def(43, "V004", 1520000, "2024-10-05", "2024-12-04", PD, E, 93),
    def(44, "V006", 890000, "2024-10-10", "2024-11-24", PD, E, 96),
    def(45, "V008", 2375000, "2024-10-15", "2024-11-29", PD, P, 94),
    def(46, "V009", 14850000, "2024-10-20", "2024-12-19", PD, E, 99),
    // error
    def(47, "V010", 725000, "2025-01-05", "2025-02-04", ER, E, 86),
    def(48, "V004", 5310000, "2025-01-07", "2025-03-08", ER, P, 85),
    def(49, "V001", 210000, "2025-01-09", "2025-02-08", ER, E, 87),
    def(50, "V007", 95000, "2025-01-11", "2025-02-10", ER, E, 88),
];

/// 各供应商的明细模板: (描述, 单价 分)
pub fn line_item_templates(vendor_id: &str) -> &'static [(&'static str, i64)] {
    match vendor_id {
        "V002" => &[
            ("Cloud Hosting Services — Monthly", 450000),
            ("Software License Renewal", 1200000),
            ("IT Consulting — Per Diem", 180000),
            ("Network Security Audit", 750000),
            ("Data Backup Service — Annual", 360000),
        ],
        "V003" => &[
            ("Aluminum Sheet Stock, 4x8 ft", 28500),
            ("Copper Wire, 500 ft Spool", 42000),
            ("Steel Tubing, 20 ft Length", 17500),
            ("Rubber Gasket Material, Roll", 9500),
            ("Fiberglass Insulation, Bundle", 13200),
        ],
        "V004" => &[
            ("CNC Machining Services — Batch", 320000),
            ("Welding Assemblies, Per Unit", 87500),
            ("Sheet Metal Fabrication", 145000),
            ("Quality Inspection Services", 60000),
            ("Custom Tooling Setup", 280000),
        ],
        "V005" => &[
            ("Portland Cement, 50 lb Bag", 1250),
            ("Structural Steel Beam, 12 ft", 34500),
            ("Plywood, 4x8 ft Sheet", 4800),
            ("Rebar, #5, 20 ft Length", 2200),
            ("Concrete Mix, Pallet", 89000),
        ],
        "V006" => &[
            ("Precision Bearing Assembly", 24500),
            ("Hydraulic Cylinder", 78000),
            ("Gear Set, Custom Spec", 120000),
            ("Linear Guide Rail", 34000),
            ("Drive Shaft, Machined", 56000),
        ],
        "V007" => &[
            ("Ergonomic Office Chair", 42500),
            ("Standing Desk, Electric", 65000),
            ("Monitor Arm, Dual", 18900),
            ("Desk Lamp, LED", 7500),
            ("Whiteboard, 4x6 ft", 21000),
        ],
        "V008" => &[
            ("Freight Shipping — Full Truckload", 380000),
            ("Warehousing — Monthly Fee", 220000),
            ("Last-Mile Delivery, Per Shipment", 14500),
            ("Customs Brokerage Fee", 85000),
            ("Pallet Storage, Per Pallet/Month", 1800),
        ],
        "V009" => &[
            ("Natural Gas Supply — Monthly", 850000),
            ("Electricity — Peak Usage (kWh)", 12),
            ("Solar Panel Lease — Monthly", 120000),
            ("Energy Audit Service", 450000),
            ("Generator Fuel Supply", 385),
        ],
        "V010" => &[
            ("Industrial Solvent, 55 gal Drum", 42500),
            ("Epoxy Resin, 5 gal Pail", 18900),
            ("Lubricant Oil, Case of 12", 9600),
            ("Cleaning Agent, 20 gal", 7800),
            ("Adhesive Compound, 10 lb", 14500),
        ],
        // V001 以及未知供应商
        _ => &[
            ("Copy Paper, 10-Ream Case", 5499),
            ("Ballpoint Pens, Box of 60", 1850),
            ("File Folders, 100-Pack", 3200),
            ("Desk Organizer Set", 4500),
            ("Sticky Notes, 12-Pack", 1275),
        ],
    }
}

pub const STEP_NAMES: [&str; 6] = [
    "Ingestion",
    "Extraction",
    "Validation",
    "Approval",
    "ERP Posting",
    "Payment",
];

/// (文件名, 大小, MIME)
pub type AttachmentRow = (&'static str, &'static str, &'static str);

const PDF: &str = "application/pdf";
const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 邮件定义: (id, 关联发票序号, 收件时间, 状态, 附件)
pub type EmailRow = (&'static str, u32, &'static str, EmailStatus, &'static [AttachmentRow]);

pub const EMAILS: &[EmailRow] = &[
    ("EM-001", 1, "2025-01-10T08:23:00Z", EmailStatus::Processed, &[("INV-2025-0001.pdf", "245 KB", PDF)]),
    ("EM-002", 9, "2025-01-08T10:45:00Z", EmailStatus::Processing, &[("INV-2025-0009.pdf", "312 KB", PDF)]),
    ("EM-003", 11, "2025-01-10T14:12:00Z", EmailStatus::Processing, &[("INV-2025-0011.pdf", "198 KB", PDF)]),
    ("EM-004", 4, "2025-01-15T09:30:00Z", EmailStatus::Processed, &[("INV-2025-0004.pdf", "156 KB", PDF), ("PO-confirmation.pdf", "89 KB", PDF)]),
    ("EM-005", 47, "2025-01-05T11:08:00Z", EmailStatus::Error, &[("INV-2025-0047.pdf", "278 KB", PDF)]),
    ("EM-006", 6, "2025-01-17T07:55:00Z", EmailStatus::Processed, &[("INV-2025-0006.pdf", "334 KB", PDF)]),
    ("EM-007", 12, "2025-01-11T13:20:00Z", EmailStatus::Processing, &[("INV-2025-0012.pdf", "267 KB", PDF), ("usage-report.xlsx", "145 KB", XLSX)]),
    ("EM-008", 49, "2025-01-09T16:40:00Z", EmailStatus::Error, &[("INV-2025-0049.pdf", "134 KB", PDF)]),
    ("EM-009", 3, "2025-01-14T10:05:00Z", EmailStatus::Processed, &[("INV-2025-0003.pdf", "421 KB", PDF)]),
    ("EM-010", 48, "2025-01-07T12:30:00Z", EmailStatus::NeedsReview, &[("INV-2025-0048.pdf", "389 KB", PDF), ("delivery-receipt.pdf", "67 KB", PDF)]),
    ("EM-011", 50, "2025-01-11T08:15:00Z", EmailStatus::NeedsReview, &[("INV-2025-0050.pdf", "176 KB", PDF)]),
    ("EM-012", 7, "2025-01-18T15:50:00Z", EmailStatus::Processed, &[("INV-2025-0007.pdf", "203 KB", PDF)]),
];

pub type ActivityRow = (&'static str, ActivityKind, &'static str, &'static str);

pub const RECENT_ACTIVITY: &[ActivityRow] = &[
    ("ACT-001", ActivityKind::InvoiceReceived, "Invoice INV-2025-0001 received from Acme Supplies Co. via email", "2025-01-19T14:32:00Z"),
    ("ACT-002", ActivityKind::InvoicePosted, "Invoice INV-2025-0038 posted to ERP for Frontier Chemical Supply", "2025-01-19T13:15:00Z"),
    ("ACT-003", ActivityKind::ErrorFlagged, "Validation error on INV-2025-0047 — amount mismatch with PO-2025-1047", "2025-01-19T12:48:00Z"),
    ("ACT-004", ActivityKind::PaymentMade, "Payment of $148,500.00 processed for INV-2025-0046 to Pinnacle Energy Services", "2025-01-19T11:20:00Z"),
    ("ACT-005", ActivityKind::VendorSubmitted, "Global Tech Solutions submitted invoice INV-2025-0005 via vendor portal", "2025-01-19T10:45:00Z"),
    ("ACT-006", ActivityKind::InvoiceReceived, "Invoice INV-2025-0008 received from Metro Industrial Corp. via portal", "2025-01-19T09:30:00Z"),
    ("ACT-007", ActivityKind::PaymentMade, "Payment of $92,300.00 processed for INV-2025-0040 to Global Tech Solutions", "2025-01-18T16:55:00Z"),
    ("ACT-008", ActivityKind::ErrorFlagged, "Extraction failed on INV-2025-0049 — unable to parse line items", "2025-01-18T15:10:00Z"),
    ("ACT-009", ActivityKind::InvoicePosted, "Invoice INV-2025-0037 posted to ERP for Elite Office Solutions", "2025-01-18T14:22:00Z"),
    ("ACT-010", ActivityKind::VendorSubmitted, "Pacific Trading Ltd. submitted invoice INV-2025-0002 via vendor portal", "2025-01-18T11:05:00Z"),
];

/// 月度量: (月份, 发票数, 自动处理数)
pub const MONTHLY_VOLUME: &[(&str, u64, u64)] = &[
    ("Aug", 180, 138),
    ("Sep", 195, 152),
    ("Oct", 205, 163),
    ("Nov", 218, 174),
    ("Dec", 224, 182),
    ("Jan", 235, 192),
];

/// 平均处理时长趋势
pub const PROCESSING_TIME_TREND: &[(&str, f64)] = &[
    ("Aug", 8.5),
    ("Sep", 7.2),
    ("Oct", 6.1),
    ("Nov", 5.4),
    ("Dec", 4.8),
    ("Jan", 4.2),
];

pub const KPI_TOTAL_INVOICES: u64 = 1247;
pub const KPI_AVG_PROCESSING_TIME: f64 = 4.2;
pub const KPI_AUTOMATION_RATE: u32 = 78;
pub const KPI_PENDING_APPROVALS: u64 = 23;
pub const KPI_TOTAL_SPEND: i64 = 2847500;
