//! 展示层格式化 (en-US 习惯)

use crate::service::totals::round2;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// 千分位分组, 输入为不带符号的整数位
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 美元金额: $1,234.56
pub fn format_currency(amount: &BigDecimal) -> String {
    let rounded = round2(amount).to_string();
    let (negative, unsigned) = match rounded.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rounded.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    let body = format!("${}.{}", group_thousands(int_part), frac_part);
    if negative && body != "$0.00" {
        format!("-{}", body)
    } else {
        body
    }
}

/// Jan 15, 2025
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Jan 15, 2025 2:30 PM
pub fn format_date_time(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// 1,234
pub fn format_number(num: i64) -> String {
    let grouped = group_thousands(&num.unsigned_abs().to_string());
    if num < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// 78%
pub fn format_percent(num: f64) -> String {
    if num.is_nan() {
        return "0%".to_string();
    }
    format!("{}%", num.round() as i64)
}

/// "2 hours ago" 一类的相对时间
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *then).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let weeks = days / 7;
    let months = days / 30;
    let years = days / 365;

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if weeks < 5 {
        plural(weeks, "week")
    } else if months < 12 {
        plural(months, "month")
    } else {
        plural(years, "year")
    }
}

/// 识别置信度百分比 (四舍五入)
pub fn confidence_percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

/// 置信度分档, 各视图统一以取整后的百分比判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(score: f64) -> Self {
        let pct = confidence_percent(score);
        if pct >= 95 {
            ConfidenceTier::High
        } else if pct >= 90 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// 前端配色
    pub fn color(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "green",
            ConfidenceTier::Medium => "amber",
            ConfidenceTier::Low => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn currency_groups_thousands_and_pads_cents() {
        assert_eq!(format_currency(&dec("1234.5")), "$1,234.50");
        assert_eq!(format_currency(&dec("148500")), "$148,500.00");
        assert_eq!(format_currency(&dec("950")), "$950.00");
        assert_eq!(format_currency(&dec("0")), "$0.00");
        assert_eq!(format_currency(&dec("-2100.25")), "-$2,100.25");
        assert_eq!(format_currency(&dec("1234567.891")), "$1,234,567.89");
    }

    #[test]
    fn dates_use_short_month_names() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date(&date), "Jan 5, 2025");

        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap();
        assert_eq!(format_date_time(&ts), "Jan 15, 2025 2:30 PM");
    }

    #[test]
    fn numbers_and_percentages() {
        assert_eq!(format_number(1247), "1,247");
        assert_eq!(format_number(-1000000), "-1,000,000");
        assert_eq!(format_number(12), "12");
        assert_eq!(format_percent(77.6), "78%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 1, 19, 15, 0, 0).unwrap();
        assert_eq!(relative_time(&(now - Duration::seconds(20)), &now), "just now");
        assert_eq!(relative_time(&(now - Duration::minutes(1)), &now), "1 minute ago");
        assert_eq!(relative_time(&(now - Duration::minutes(42)), &now), "42 minutes ago");
        assert_eq!(relative_time(&(now - Duration::hours(3)), &now), "3 hours ago");
        assert_eq!(relative_time(&(now - Duration::days(1)), &now), "1 day ago");
        assert_eq!(relative_time(&(now - Duration::days(15)), &now), "2 weeks ago");
        assert_eq!(relative_time(&(now - Duration::days(40)), &now), "1 month ago");
        assert_eq!(relative_time(&(now - Duration::days(800)), &now), "2 years ago");
    }

    #[test]
    fn confidence_tier_boundaries() {
        assert_eq!(ConfidenceTier::from_score(0.95), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.946), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.94), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.90), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.894), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.5).color(), "red");
        assert_eq!(confidence_percent(0.999), 100);
    }
}
