//! Expense view-model: raw records in, display rows and a total out.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::is_truthy;
use crate::instant::{self, parse_instant};
use crate::{format_currency, FilterWindow, ReviewStatus};

/// Fields scanned, in order, for a record's creation time
pub const DATE_FIELDS: [&str; 5] = ["createdAt", "created_at", "createdDate", "date", "timestamp"];

/// Fields scanned, in order, for a record's category label
pub const CATEGORY_FIELDS: [&str; 3] = ["category", "description", "type"];

/// Fields scanned, in order, for a receipt image
pub const IMAGE_FIELDS: [&str; 4] = ["image", "imageUrl", "receiptImage", "receipt"];

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_TITLE: &str = "Survey Route";

/// A single expense line item as the gateway sent it.
///
/// The shape is not owned by this system, so the record stays a JSON value
/// and every accessor degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ExpenseRecord(pub Value);

impl ExpenseRecord {
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        CATEGORY_FIELDS
            .iter()
            .filter_map(|field| self.0.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|label| !label.is_empty())
    }

    /// Numeric amount with JavaScript `Number()` coercion; anything unusable is 0
    pub fn amount(&self) -> f64 {
        js_number(self.0.get("amount"))
    }

    /// Amount magnitude exactly as the record carries it
    pub fn amount_display(&self) -> String {
        match self.0.get("amount") {
            Some(Value::Number(number)) => format_currency(number),
            Some(Value::String(text)) if !text.trim().is_empty() => format_currency(text),
            other => format_currency(js_number(other)),
        }
    }

    /// First truthy timestamp candidate
    pub fn created_at(&self) -> Option<&Value> {
        DATE_FIELDS
            .iter()
            .filter_map(|field| self.0.get(*field))
            .find(|value| is_truthy(value))
    }

    pub fn title(&self) -> Option<&str> {
        ["tourName", "title"]
            .iter()
            .filter_map(|field| self.0.get(*field).and_then(Value::as_str))
            .find(|title| !title.trim().is_empty())
    }

    /// Receipt image as a displayable `src`
    pub fn image_src(&self) -> Option<String> {
        let raw = IMAGE_FIELDS
            .iter()
            .filter_map(|field| self.0.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|raw| !raw.is_empty())?;
        Some(image_src(raw))
    }
}

/// Normalize an image reference: data URIs and http(s) URLs pass through,
/// bare base64 payloads get a data-URI prefix guessed from their magic bytes.
pub fn image_src(raw: &str) -> String {
    if raw.starts_with("data:") || raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }
    let mime = if raw.starts_with("iVBOR") {
        "image/png"
    } else if raw.starts_with("R0lGOD") {
        "image/gif"
    } else if raw.starts_with("UklGR") {
        "image/webp"
    } else {
        "image/jpeg"
    };
    format!("data:{};base64,{}", mime, raw)
}

/// Numeric coercion in the manner of JavaScript `Number(value) || 0`.
///
/// Numbers pass through; strings are trimmed and parsed as decimals or as
/// `0x`/`0o`/`0b` integers, with the empty string as 0; `true` is 1; a
/// single-element array coerces its element. Everything else, and any
/// non-finite result, is 0.
pub fn js_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        Some(Value::String(text)) => parse_js_numeric(text),
        Some(Value::Array(items)) if items.len() == 1 => match &items[0] {
            // Number([true]) is NaN, unlike Number(true)
            Value::Number(_) | Value::String(_) | Value::Array(_) => js_number(items.first()),
            _ => 0.0,
        },
        _ => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

fn parse_js_numeric(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    match radix {
        Some(radix) => u64::from_str_radix(&text[2..], radix)
            .map(|value| value as f64)
            .unwrap_or(0.0),
        // Rust also accepts "inf" and "nan", which the finite check turns into 0
        None => text.parse::<f64>().unwrap_or(0.0),
    }
}

/// One display row of a tour's expense table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub category: String,
    /// Numeric amount that feeds the total
    pub amount: f64,
    /// `"₹ "` followed by the magnitude as given
    pub amount_display: String,
    pub image: Option<String>,
}

impl ExpenseRow {
    /// Build a row; records without an id get the stable key `"{tour_id}-{index}"`
    pub fn from_record(tour_id: &str, index: usize, record: &ExpenseRecord) -> Self {
        Self {
            id: record.id().unwrap_or_else(|| format!("{}-{}", tour_id, index)),
            category: record.category().unwrap_or(DEFAULT_CATEGORY).to_string(),
            amount: record.amount(),
            amount_display: record.amount_display(),
            image: record.image_src(),
        }
    }
}

/// All expenses of one tour for one filter window, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourExpenseGroup {
    pub tour_id: String,
    pub title: String,
    /// Date of the first record, or "Recent"
    pub date: String,
    /// Instant behind `date`, when it resolved
    pub created_at: Option<DateTime<Utc>>,
    pub expenses: Vec<ExpenseRow>,
    pub total_expense: f64,
    pub filter: FilterWindow,
    pub remark: String,
    pub status: ReviewStatus,
}

impl TourExpenseGroup {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_display(&self) -> String {
        format_currency(self.total_expense)
    }
}

/// Normalize with dates rendered in UTC
pub fn normalize(tour_id: &str, records: &[ExpenseRecord], filter: FilterWindow) -> TourExpenseGroup {
    normalize_with_offset(tour_id, records, filter, instant::utc_offset())
}

/// Build the expense group for a tour.
///
/// Rows keep source order. The total sums the numeric amounts, never the
/// display strings. The group date comes from the first record only.
pub fn normalize_with_offset(
    tour_id: &str,
    records: &[ExpenseRecord],
    filter: FilterWindow,
    offset: FixedOffset,
) -> TourExpenseGroup {
    let expenses: Vec<ExpenseRow> = records
        .iter()
        .enumerate()
        .map(|(index, record)| ExpenseRow::from_record(tour_id, index, record))
        .collect();
    let total_expense = expenses.iter().map(|row| row.amount).sum();

    let first = records.first();
    let created_at = first.and_then(ExpenseRecord::created_at).and_then(parse_instant);
    let title = first
        .and_then(ExpenseRecord::title)
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    TourExpenseGroup {
        tour_id: tour_id.to_string(),
        title,
        date: instant::display_date(created_at, offset),
        created_at,
        expenses,
        total_expense,
        filter,
        remark: String::new(),
        status: ReviewStatus::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::RECENT_PLACEHOLDER;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<ExpenseRecord> {
        values.into_iter().map(ExpenseRecord).collect()
    }

    #[test]
    fn test_total_matches_coerced_amounts() {
        let raw = records(vec![
            json!({ "id": "e1", "category": "Fuel", "amount": 1000 }),
            json!({ "id": "e2", "category": "Food", "amount": "300" }),
            json!({ "id": "e3", "category": "Hotel", "amount": " 500.5 " }),
            json!({ "id": "e4", "category": "Misc", "amount": "abc" }),
            json!({ "id": "e5", "category": "Misc" }),
            json!({ "id": "e6", "category": "Misc", "amount": null }),
        ]);
        let group = normalize("tour-1", &raw, FilterWindow::LastMonth);

        let expected: f64 = raw.iter().map(ExpenseRecord::amount).sum();
        assert_eq!(group.total_expense, expected);
        assert_eq!(group.total_expense, 1800.5);
        assert_eq!(group.total_display(), "₹ 1800.5");
    }

    #[test]
    fn test_string_amounts_are_not_concatenated() {
        let raw = records(vec![json!({ "amount": "10" }), json!({ "amount": "20" })]);
        let group = normalize("t", &raw, FilterWindow::Today);
        assert_eq!(group.total_expense, 30.0);
    }

    #[test]
    fn test_missing_amount_contributes_zero_and_category_falls_back() {
        let raw = records(vec![json!({ "id": "x" }), json!({ "id": "y", "amount": "n/a" })]);
        let group = normalize("t", &raw, FilterWindow::LastMonth);

        assert_eq!(group.total_expense, 0.0);
        for row in &group.expenses {
            assert_eq!(row.amount, 0.0);
            assert_eq!(row.category, DEFAULT_CATEGORY);
        }
        assert_eq!(group.expenses[0].amount_display, "₹ 0");
        assert_eq!(group.expenses[1].amount_display, "₹ n/a");
    }

    #[test]
    fn test_amount_display_passes_magnitude_through() {
        let raw = records(vec![
            json!({ "amount": 1000 }),
            json!({ "amount": 12.5 }),
            json!({ "amount": "1,250.00" }),
        ]);
        let group = normalize("t", &raw, FilterWindow::LastMonth);
        let displayed: Vec<&str> = group.expenses.iter().map(|row| row.amount_display.as_str()).collect();
        assert_eq!(displayed, vec!["₹ 1000", "₹ 12.5", "₹ 1,250.00"]);
        // "1,250.00" is NaN to Number(), so it adds nothing
        assert_eq!(group.total_expense, 1012.5);
    }

    #[test]
    fn test_category_fallback_chain() {
        let raw = records(vec![
            json!({ "category": "Fuel", "description": "Diesel" }),
            json!({ "category": "  ", "description": "Lunch" }),
            json!({ "type": "Hotel" }),
            json!({}),
        ]);
        let group = normalize("t", &raw, FilterWindow::LastMonth);
        let categories: Vec<&str> = group.expenses.iter().map(|row| row.category.as_str()).collect();
        assert_eq!(categories, vec!["Fuel", "Lunch", "Hotel", "General"]);
    }

    #[test]
    fn test_fallback_ids_are_stable() {
        let raw = records(vec![json!({ "amount": 1 }), json!({ "id": 42, "amount": 2 }), json!({ "id": "", "amount": 3 })]);
        let first = normalize("tour-9", &raw, FilterWindow::LastMonth);
        let second = normalize("tour-9", &raw, FilterWindow::LastMonth);

        let ids: Vec<&str> = first.expenses.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["tour-9-0", "42", "tour-9-2"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_date_comes_from_first_record_only() {
        let raw = records(vec![
            json!({ "created_at": { "_seconds": 1700000000 }, "date": "2020-01-01" }),
            json!({ "createdAt": "2024-06-01T00:00:00Z" }),
        ]);
        let group = normalize("t", &raw, FilterWindow::LastMonth);
        assert_eq!(group.date, "14 Nov 2023");
    }

    #[test]
    fn test_date_field_precedence() {
        let raw = records(vec![json!({ "timestamp": 1700000000000_i64, "createdDate": "2021-05-05" })]);
        let group = normalize("t", &raw, FilterWindow::LastMonth);
        assert_eq!(group.date, "05 May 2021");
    }

    #[test]
    fn test_unresolved_date_is_recent() {
        let raw = records(vec![json!({ "createdAt": {} })]);
        assert_eq!(normalize("t", &raw, FilterWindow::LastMonth).date, RECENT_PLACEHOLDER);

        let no_date = records(vec![json!({ "amount": 5 })]);
        let group = normalize("t", &no_date, FilterWindow::LastMonth);
        assert_eq!(group.date, RECENT_PLACEHOLDER);
        assert!(group.created_at.is_none());
    }

    #[test]
    fn test_empty_input() {
        let group = normalize("t", &[], FilterWindow::Today);
        assert_eq!(group.total_expense, 0.0);
        assert!(group.is_empty());
        assert_eq!(group.date, RECENT_PLACEHOLDER);
        assert_eq!(group.title, DEFAULT_TITLE);
        assert_eq!(group.status, ReviewStatus::Pending);
        assert_eq!(group.filter, FilterWindow::Today);
    }

    #[test]
    fn test_image_sources() {
        assert_eq!(image_src("https://cdn.example.com/r.jpg"), "https://cdn.example.com/r.jpg");
        assert_eq!(image_src("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(image_src("/9j/4AAQ"), "data:image/jpeg;base64,/9j/4AAQ");
        assert_eq!(image_src("iVBORw0KGgo"), "data:image/png;base64,iVBORw0KGgo");

        let record = ExpenseRecord(json!({ "receiptImage": "R0lGODlh" }));
        assert_eq!(record.image_src().as_deref(), Some("data:image/gif;base64,R0lGODlh"));
        assert_eq!(ExpenseRecord(json!({ "image": "" })).image_src(), None);
    }

    #[test]
    fn test_js_number_coercion() {
        assert_eq!(js_number(Some(&json!(true))), 1.0);
        assert_eq!(js_number(Some(&json!(false))), 0.0);
        assert_eq!(js_number(Some(&json!("  "))), 0.0);
        assert_eq!(js_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(js_number(Some(&json!("Infinity"))), 0.0);
        assert_eq!(js_number(Some(&json!([5]))), 5.0);
        assert_eq!(js_number(Some(&json!(["12"]))), 12.0);
        assert_eq!(js_number(Some(&json!([1, 2]))), 0.0);
        assert_eq!(js_number(Some(&json!([]))), 0.0);
        assert_eq!(js_number(Some(&json!([true]))), 0.0);
        assert_eq!(js_number(Some(&json!("0x10"))), 16.0);
        assert_eq!(js_number(Some(&json!(" 0b101 "))), 5.0);
        assert_eq!(js_number(Some(&json!("0o17"))), 15.0);
        assert_eq!(js_number(Some(&json!("0xZZ"))), 0.0);
        assert_eq!(js_number(None), 0.0);
    }
}
