use chrono::FixedOffset;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::instant::{format_calendar_date, parse_instant};

/// Placeholder for empty table cells
pub const EMPTY_CELL: &str = "—";

const STAFF_ID_DISPLAY_LEN: usize = 12;

/// Tour summary as returned by `getTour`.
///
/// Text columns accept strings or numbers; any other shape reads as absent so
/// the row still renders with placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TourSummary {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub tour_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    /// Any timestamp shape the instant parser understands
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub start_date: Value,
    /// Active flag; only a literal boolean places the tour in a tab
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub status: Value,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub asm_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Value::deserialize(deserializer).map(text_of)
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(|value| text_of(value).unwrap_or_default())
}

impl TourSummary {
    pub fn is_active(&self) -> bool {
        self.status == Value::Bool(true)
    }

    pub fn is_inactive(&self) -> bool {
        self.status == Value::Bool(false)
    }

    pub fn title_label(&self) -> String {
        non_empty(self.tour_name.as_deref()).unwrap_or(EMPTY_CELL).to_string()
    }

    /// Staff id cut to its first 12 characters
    pub fn staff_label(&self) -> String {
        non_empty(self.staff_id.as_deref())
            .map(|staff_id| staff_id.chars().take(STAFF_ID_DISPLAY_LEN).collect())
            .unwrap_or_else(|| EMPTY_CELL.to_string())
    }

    pub fn survey_date_label(&self, offset: FixedOffset) -> String {
        parse_instant(&self.start_date)
            .map(|instant| format_calendar_date(instant, offset))
            .unwrap_or_else(|| EMPTY_CELL.to_string())
    }

    pub fn asm_name_label(&self) -> String {
        non_empty(self.asm_name.as_deref()).unwrap_or(EMPTY_CELL).to_string()
    }

    pub fn mobile_label(&self) -> String {
        non_empty(self.phone.as_deref())
            .or_else(|| non_empty(self.phone_number.as_deref()))
            .unwrap_or(EMPTY_CELL)
            .to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// The two tabs of the tour list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TourTab {
    #[default]
    Active,
    /// Despite its label this tab lists tours whose flag is `false`
    All,
}

impl TourTab {
    pub const ALL: [TourTab; 2] = [TourTab::Active, TourTab::All];

    pub fn label(self) -> &'static str {
        match self {
            TourTab::Active => "ACTIVE TOUR",
            TourTab::All => "All Tour",
        }
    }

    pub fn includes(self, tour: &TourSummary) -> bool {
        match self {
            TourTab::Active => tour.is_active(),
            TourTab::All => tour.is_inactive(),
        }
    }
}

/// Tours shown under `tab`, in list order
pub fn partition_tours(tours: &[TourSummary], tab: TourTab) -> Vec<&TourSummary> {
    tours.iter().filter(|tour| tab.includes(tour)).collect()
}

/// Counters for the stats header above the tour table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TourStats {
    pub active: usize,
    pub inactive: usize,
    pub total: usize,
}

impl TourStats {
    pub fn from_tours(tours: &[TourSummary]) -> Self {
        Self {
            active: tours.iter().filter(|tour| tour.is_active()).count(),
            inactive: tours.iter().filter(|tour| tour.is_inactive()).count(),
            total: tours.len(),
        }
    }
}
