use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod cache;
pub mod envelope;
pub mod error;
pub mod expense_view;
pub mod expenses;
pub mod generation;
pub mod instant;
pub mod tours;

pub use cache::{KeyValueStore, MemoryStore, TourCache, TourFetchOutcome, TOUR_CACHE_KEY};
pub use envelope::{Envelope, EnvelopeShape};
pub use error::{CacheError, GatewayError};
pub use expense_view::{ExpenseAction, ExpensePageState, LoadState, PanelDraft, PanelState};
pub use expenses::{normalize, normalize_with_offset, ExpenseRecord, ExpenseRow, TourExpenseGroup};
pub use generation::{RequestGeneration, RequestTicket};
pub use instant::{display_date, format_calendar_date, parse_instant, ToInstant};
pub use tours::{partition_tours, TourStats, TourSummary, TourTab};

/// Route prefix under which the gateway exposes callable functions
pub const FUNCTIONS_PATH: &str = "/api/functions";

/// Route the frontend logger posts to
pub const LOGS_PATH: &str = "/api/logs";

/// Currency glyph prefixed to every displayed amount
pub const CURRENCY_GLYPH: &str = "₹";

/// Names of the callable functions the dashboard consumes
pub mod functions {
    pub const GET_TOUR: &str = "getTour";
    pub const GET_EXPENSES: &str = "getExpenses";
    pub const GET_SURVEY: &str = "getSurvey";
    pub const GET_DISTRICT: &str = "getDistrict";
    pub const GET_CITY: &str = "getCity";
    pub const GET_STATE: &str = "getState";
    pub const GET_DESIGNATION: &str = "getDesignation";

    pub const ALL: [&str; 7] = [
        GET_TOUR,
        GET_EXPENSES,
        GET_SURVEY,
        GET_DISTRICT,
        GET_CITY,
        GET_STATE,
        GET_DESIGNATION,
    ];
}

/// Request body of a callable function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CallableRequest {
    /// Function payload, `null` when the call takes no arguments
    #[serde(default)]
    pub data: Value,
}

/// Successful response body of a callable function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableResponse {
    pub result: Value,
}

/// Error response body of a callable function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableErrorBody {
    pub error: CallableErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableErrorDetail {
    /// Canonical status name, e.g. `NOT_FOUND` or `INVALID_ARGUMENT`
    pub status: String,
    pub message: String,
}

/// Log line forwarded from the browser to the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

/// Server-side time window for expense retrieval.
///
/// Travels over the wire as its integer code (0 = today, 1 = last month,
/// 2 = last three months).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FilterWindow {
    Today,
    #[default]
    LastMonth,
    LastThreeMonths,
}

impl FilterWindow {
    pub const ALL: [FilterWindow; 3] = [
        FilterWindow::Today,
        FilterWindow::LastMonth,
        FilterWindow::LastThreeMonths,
    ];

    pub fn code(self) -> u8 {
        match self {
            FilterWindow::Today => 0,
            FilterWindow::LastMonth => 1,
            FilterWindow::LastThreeMonths => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FilterWindow::Today),
            1 => Some(FilterWindow::LastMonth),
            2 => Some(FilterWindow::LastThreeMonths),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterWindow::Today => "Today",
            FilterWindow::LastMonth => "1 Month",
            FilterWindow::LastThreeMonths => "3 Months",
        }
    }

    /// Earliest instant (inclusive) covered by this window, in UTC
    pub fn window_start(self, now: chrono::DateTime<chrono::Utc>) -> chrono::DateTime<chrono::Utc> {
        use chrono::Months;

        match self {
            FilterWindow::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc())
                .unwrap_or(now),
            FilterWindow::LastMonth => now.checked_sub_months(Months::new(1)).unwrap_or(now),
            FilterWindow::LastThreeMonths => now.checked_sub_months(Months::new(3)).unwrap_or(now),
        }
    }
}

impl From<FilterWindow> for u8 {
    fn from(window: FilterWindow) -> Self {
        window.code()
    }
}

impl TryFrom<u8> for FilterWindow {
    type Error = UnknownFilterCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        FilterWindow::from_code(code).ok_or(UnknownFilterCode(code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter code {0} (expected 0, 1 or 2)")]
pub struct UnknownFilterCode(pub u8);

/// Payload of `getExpenses`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseQuery {
    #[serde(rename = "tourId")]
    pub tour_id: String,
    #[serde(default)]
    pub filter: FilterWindow,
}

/// Review state of a tour's expense group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Rejected => "Rejected",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

/// Prefix a magnitude with the currency glyph, passing the magnitude through untouched
pub fn format_currency(magnitude: impl fmt::Display) -> String {
    format!("{} {}", CURRENCY_GLYPH, magnitude)
}
