//! 通用可排序表格
//!
//! 列定义 + 记录集合 -> 渲染视图。排序状态 (列, 方向) 由表格实例自己持有,
//! 与筛选条件互不干扰; 排序总是作用在传入集合的副本上。

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// 单元格原始值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Decimal(BigDecimal),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Option 为 None 时得到 Null
    pub fn from_option<T: Into<CellValue>>(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Decimal(_) | CellValue::Float(_))
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Decimal(d) => d.to_f64(),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<BigDecimal> for CellValue {
    fn from(value: BigDecimal) -> Self {
        CellValue::Decimal(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// 近似 localeCompare: 先忽略大小写比较, 相同再让小写排在大写之前。
/// 按码点比较, 带变音符的字母 (é) 排在所有基本拉丁字母之后, 与 ICU 排序不同
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// 两个非空值的比较: 同为数值按数值, 否则按字符串
fn compare_present(a: &CellValue, b: &CellValue) -> Ordering {
    if a.is_numeric() && b.is_numeric() {
        if let (CellValue::Decimal(x), CellValue::Decimal(y)) = (a, b) {
            return x.cmp(y);
        }
        let (x, y) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
        return x.total_cmp(&y);
    }
    locale_compare(&a.to_string(), &b.to_string())
}

/// 排序比较器: Null 不论方向都排在最后, 其余结果按方向取反
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_present(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// 稳定归并排序。按列逐对比较的结果在混合类型列上不一定可传递,
/// 这里只要求得到一个确定的顺序, 不依赖比较函数满足全序
fn merge_sort_by<T, F>(items: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        // 右侧严格更小才先取, 保持稳定
        if compare(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.copy_from_slice(&merged);
}

/// 可以放进表格的记录
pub trait TableRow {
    /// 按列 key 取值, 未知列返回 Null
    fn cell(&self, key: &str) -> CellValue;

    /// 行标识, 缺省时退回行号
    fn row_id(&self) -> Option<&str> {
        None
    }
}

/// 单元格格式化函数 (值, 整行) -> 展示文本
pub type CellFormatter<R> = Box<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// 行点击回调, 收到整条记录
pub type RowClickHandler<R> = Box<dyn FnMut(&R) + Send>;

/// 列定义
pub struct Column<R> {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    formatter: Option<CellFormatter<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            formatter: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn format<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// 有格式化函数用格式化结果, 否则直接展示原始值
    pub fn render_cell(&self, row: &R) -> String
    where
        R: TableRow,
    {
        let value = row.cell(&self.key);
        match &self.formatter {
            Some(formatter) => formatter(&value, row),
            None => value.to_string(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// 排序状态; key 为 None 表示保持原始顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn is_sorted(&self) -> bool {
        self.key.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("column '{0}' is not sortable")]
    NotSortable(String),
}

/// 表头排序图标所反映的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    Ascending,
    Descending,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<SortIndicator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub key: RowKey,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    Rows { rows: Vec<RowView> },
    /// 占满整行的空状态提示
    Empty { message: String, col_span: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub columns: Vec<HeaderView>,
    pub body: TableBody,
}

impl RenderedTable {
    /// 数据行 (空状态时为空)
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            TableBody::Rows { rows } => rows,
            TableBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }
}

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available.";

/// 可排序表格
pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    sort: SortState,
    empty_message: String,
    on_row_click: Option<RowClickHandler<R>>,
}

impl<R: TableRow> DataTable<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        debug_assert!(
            columns
                .iter()
                .enumerate()
                .all(|(i, c)| columns[..i].iter().all(|prev| prev.key != c.key)),
            "column keys must be unique"
        );
        Self {
            columns,
            sort: SortState::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            on_row_click: None,
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&R) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// 点击表头: 新列 -> 升序; 当前列 -> 切换方向; 不可排序列 -> 无变化。
    /// 返回排序状态是否改变
    pub fn click_header(&mut self, key: &str) -> bool {
        match self.column(key) {
            Some(column) if column.sortable => {}
            _ => return false,
        }

        if self.sort.key.as_deref() == Some(key) {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort.key = Some(key.to_string());
            self.sort.direction = SortDirection::Ascending;
        }
        true
    }

    /// 直接指定排序 (无状态调用方使用)
    pub fn sort_by(&mut self, key: &str, direction: SortDirection) -> Result<(), SortError> {
        let column = self
            .column(key)
            .ok_or_else(|| SortError::UnknownColumn(key.to_string()))?;
        if !column.sortable {
            return Err(SortError::NotSortable(key.to_string()));
        }
        self.sort = SortState {
            key: Some(key.to_string()),
            direction,
        };
        Ok(())
    }

    /// 恢复原始顺序
    pub fn clear_sort(&mut self) {
        self.sort = SortState::default();
    }

    /// 按当前排序状态得到行顺序, 不修改输入
    pub fn sorted_rows<'a>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let mut ordered: Vec<&R> = rows.iter().collect();
        if let Some(key) = &self.sort.key {
            let direction = self.sort.direction;
            merge_sort_by(&mut ordered, &mut |a: &&R, b: &&R| {
                compare_cells(&a.cell(key), &b.cell(key), direction)
            });
        }
        ordered
    }

    fn indicator_for(&self, column: &Column<R>) -> Option<SortIndicator> {
        if !column.sortable {
            return None;
        }
        if self.sort.key.as_deref() == Some(column.key.as_str()) {
            Some(match self.sort.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            })
        } else {
            Some(SortIndicator::Neutral)
        }
    }

    pub fn headers(&self) -> Vec<HeaderView> {
        self.columns
            .iter()
            .map(|column| HeaderView {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                indicator: self.indicator_for(column),
            })
            .collect()
    }

    pub fn render(&self, rows: &[R]) -> RenderedTable {
        let columns = self.headers();
        if rows.is_empty() {
            return RenderedTable {
                columns,
                body: TableBody::Empty {
                    message: self.empty_message.clone(),
                    col_span: self.columns.len(),
                },
            };
        }

        let rows = self
            .sorted_rows(rows)
            .into_iter()
            .enumerate()
            .map(|(index, row)| RowView {
                key: match row.row_id() {
                    Some(id) if !id.is_empty() => RowKey::Id(id.to_string()),
                    _ => RowKey::Index(index),
                },
                cells: self.columns.iter().map(|c| c.render_cell(row)).collect(),
            })
            .collect();

        RenderedTable {
            columns,
            body: TableBody::Rows { rows },
        }
    }

    /// 渲染为 CSV: 表头为列名, 之后每行为格式化后的单元格
    pub fn render_csv(&self, rows: &[R]) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.columns.iter().map(|c| c.label.as_str()))?;
        for row in self.sorted_rows(rows) {
            writer.write_record(self.columns.iter().map(|c| c.render_cell(row)))?;
        }
        writer.flush()?;
        writer.into_inner().map_err(|e| {
            csv::Error::from(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }

    /// 行点击; 没有回调时无默认行为
    pub fn click_row(&mut self, row: &R) -> bool {
        match self.on_row_click.as_mut() {
            Some(handler) => {
                handler(row);
                true
            }
            None => false,
        }
    }
}
