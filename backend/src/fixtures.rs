//! Canned callable-function data served by the development gateway.
//!
//! The fixture file is one JSON object:
//!
//! ```json
//! {
//!   "tours": [ { "id": "T-1", "tourName": "...", "status": true } ],
//!   "expenses": { "T-1": [ { "category": "Fuel", "amount": 1000 } ] },
//!   "surveys": [ { "tourId": "T-1", "shopName": "..." } ],
//!   "districts": [], "cities": [], "states": [], "designations": []
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use shared::{parse_instant, ExpenseQuery, ExpenseRecord};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureStore {
    #[serde(default)]
    pub tours: Vec<Value>,
    /// Expense records keyed by tour id
    #[serde(default)]
    pub expenses: HashMap<String, Vec<Value>>,
    #[serde(default)]
    pub surveys: Vec<Value>,
    #[serde(default)]
    pub districts: Vec<Value>,
    #[serde(default)]
    pub cities: Vec<Value>,
    #[serde(default)]
    pub states: Vec<Value>,
    #[serde(default)]
    pub designations: Vec<Value>,
}

impl FixtureStore {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid fixture file {}", path.display()))
    }

    /// Expenses of a tour inside the query's filter window.
    ///
    /// Records whose timestamp cannot be resolved are always included.
    pub fn expenses_for(&self, query: &ExpenseQuery, now: DateTime<Utc>) -> Vec<Value> {
        let since = query.filter.window_start(now);
        self.expenses
            .get(&query.tour_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| {
                        let record = ExpenseRecord((*record).clone());
                        match record.created_at().and_then(parse_instant) {
                            Some(created_at) => created_at >= since,
                            None => true,
                        }
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Surveys, optionally narrowed to one tour
    pub fn surveys_for(&self, tour_id: Option<&str>) -> Vec<Value> {
        match tour_id {
            Some(tour_id) => self
                .surveys
                .iter()
                .filter(|survey| survey.get("tourId").and_then(Value::as_str) == Some(tour_id))
                .cloned()
                .collect(),
            None => self.surveys.clone(),
        }
    }
}
