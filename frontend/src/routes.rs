use gloo::history::{BrowserHistory, History};
use serde::{Deserialize, Serialize};

use crate::services::logging::Logger;

/// Pages of the dashboard, matched on the location path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AsmSurvey,
    Expenses,
    SurveyDetails,
    Location,
    Login,
    NotFound,
}

impl Route {
    pub fn recognize(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" | "/asm-survey" => Route::AsmSurvey,
            "/asm-survey/expenses" => Route::Expenses,
            "/asm-survey/survey-details" => Route::SurveyDetails,
            "/asm-survey/location" => Route::Location,
            "/login" => Route::Login,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::AsmSurvey => "/asm-survey",
            Route::Expenses => "/asm-survey/expenses",
            Route::SurveyDetails => "/asm-survey/survey-details",
            Route::Location => "/asm-survey/location",
            Route::Login => "/login",
            Route::NotFound => "/404",
        }
    }
}

/// The `?tourId=` query shared by the per-tour pages
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TourQuery {
    #[serde(rename = "tourId", default, skip_serializing_if = "Option::is_none")]
    pub tour_id: Option<String>,
}

impl TourQuery {
    /// Tour id from the current location; blank values count as absent
    pub fn current() -> Self {
        let location = BrowserHistory::new().location();
        let query = location.query::<TourQuery>().unwrap_or_default();
        query.normalized()
    }

    fn normalized(self) -> Self {
        Self {
            tour_id: self.tour_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

/// Row actions of the tour table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourAction {
    ViewExpenses,
    ViewSurvey,
    ViewLocation,
}

impl TourAction {
    pub const ALL: [TourAction; 3] = [
        TourAction::ViewExpenses,
        TourAction::ViewSurvey,
        TourAction::ViewLocation,
    ];

    pub fn route(self) -> Route {
        match self {
            TourAction::ViewExpenses => Route::Expenses,
            TourAction::ViewSurvey => Route::SurveyDetails,
            TourAction::ViewLocation => Route::Location,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TourAction::ViewExpenses => "Expenses",
            TourAction::ViewSurvey => "Survey",
            TourAction::ViewLocation => "Location",
        }
    }
}

pub fn navigate(route: Route, tour_id: Option<&str>) {
    let history = BrowserHistory::new();
    match tour_id {
        Some(tour_id) => {
            let query = TourQuery {
                tour_id: Some(tour_id.to_string()),
            };
            if let Err(e) = history.push_with_query(route.path(), query) {
                Logger::warn_with_component(
                    "routes",
                    &format!("Could not encode tour query, navigating without it: {}", e),
                );
                history.push(route.path());
            }
        }
        None => history.push(route.path()),
    }
}
