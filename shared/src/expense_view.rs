//! # Expense Page State
//!
//! State of the expense detail page and the transitions between its states.
//!
//! ## Responsibilities:
//! - Load lifecycle (`Loading` → `Empty` | `Populated`)
//! - Expanded/collapsed groups (multi-select)
//! - Remark/status side panel (`Closed` → `Open` → `Closed`)
//! - Dropping responses that belong to superseded requests
//!
//! The side panel edits local state only; there is no persistence call for
//! remarks or review status.

use std::collections::BTreeSet;

use crate::expenses::TourExpenseGroup;
use crate::generation::RequestTicket;
use crate::{ExpenseQuery, FilterWindow, ReviewStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Empty,
    Populated(Vec<TourExpenseGroup>),
}

/// Draft values held while the side panel is open
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDraft {
    pub tour_id: String,
    pub remark: String,
    pub status: ReviewStatus,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open(PanelDraft),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseAction {
    /// The `tourId` query parameter changed
    Navigate(Option<String>),
    SetFilter(FilterWindow),
    FetchStarted(RequestTicket),
    FetchSucceeded {
        ticket: RequestTicket,
        group: TourExpenseGroup,
    },
    FetchFailed {
        ticket: RequestTicket,
    },
    ToggleGroup(String),
    OpenPanel(String),
    EditRemark(String),
    EditStatus(ReviewStatus),
    ClosePanel,
    /// Write the drafts into the group and close the panel
    ConfirmUpdate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePageState {
    pub tour_id: Option<String>,
    pub filter: FilterWindow,
    pub load: LoadState,
    pub expanded: BTreeSet<String>,
    pub panel: PanelState,
    in_flight: Option<RequestTicket>,
}

impl ExpensePageState {
    pub fn new(tour_id: Option<String>, filter: FilterWindow) -> Self {
        let load = if tour_id.is_some() {
            LoadState::Loading
        } else {
            LoadState::Empty
        };
        Self {
            tour_id,
            filter,
            load,
            expanded: BTreeSet::new(),
            panel: PanelState::Closed,
            in_flight: None,
        }
    }

    /// The request the page needs, or `None` without a tour id.
    ///
    /// Changes exactly when the tour id or the filter changes, so it doubles as
    /// the dependency that triggers a fetch.
    pub fn fetch_query(&self) -> Option<ExpenseQuery> {
        self.tour_id.as_ref().map(|tour_id| ExpenseQuery {
            tour_id: tour_id.clone(),
            filter: self.filter,
        })
    }

    pub fn groups(&self) -> &[TourExpenseGroup] {
        match &self.load {
            LoadState::Populated(groups) => groups,
            LoadState::Loading | LoadState::Empty => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn is_expanded(&self, tour_id: &str) -> bool {
        self.expanded.contains(tour_id)
    }

    pub fn apply(&mut self, action: ExpenseAction) {
        match action {
            ExpenseAction::Navigate(tour_id) => {
                if tour_id == self.tour_id {
                    return;
                }
                self.load = if tour_id.is_some() {
                    LoadState::Loading
                } else {
                    LoadState::Empty
                };
                self.tour_id = tour_id;
                self.panel = PanelState::Closed;
                self.in_flight = None;
            }
            ExpenseAction::SetFilter(filter) => {
                if filter == self.filter {
                    return;
                }
                self.filter = filter;
                self.in_flight = None;
                if self.tour_id.is_some() {
                    self.load = LoadState::Loading;
                }
            }
            ExpenseAction::FetchStarted(ticket) => {
                self.in_flight = Some(ticket);
                self.load = LoadState::Loading;
            }
            ExpenseAction::FetchSucceeded { ticket, group } => {
                if self.in_flight != Some(ticket) {
                    return;
                }
                self.in_flight = None;
                // Only the loaded group's id is kept
                self.expanded.clear();
                if group.is_empty() {
                    self.load = LoadState::Empty;
                } else {
                    self.expanded.insert(group.tour_id.clone());
                    self.load = LoadState::Populated(vec![group]);
                }
            }
            ExpenseAction::FetchFailed { ticket } => {
                if self.in_flight != Some(ticket) {
                    return;
                }
                self.in_flight = None;
                self.load = LoadState::Empty;
            }
            ExpenseAction::ToggleGroup(tour_id) => {
                if !self.expanded.remove(&tour_id) {
                    self.expanded.insert(tour_id);
                }
            }
            ExpenseAction::OpenPanel(tour_id) => {
                let draft = self
                    .groups()
                    .iter()
                    .find(|group| group.tour_id == tour_id)
                    .map(|group| PanelDraft {
                        tour_id: group.tour_id.clone(),
                        remark: group.remark.clone(),
                        status: group.status,
                    });
                if let Some(draft) = draft {
                    self.panel = PanelState::Open(draft);
                }
            }
            ExpenseAction::EditRemark(remark) => {
                if let PanelState::Open(draft) = &mut self.panel {
                    draft.remark = remark;
                }
            }
            ExpenseAction::EditStatus(status) => {
                if let PanelState::Open(draft) = &mut self.panel {
                    draft.status = status;
                }
            }
            ExpenseAction::ClosePanel => {
                self.panel = PanelState::Closed;
            }
            ExpenseAction::ConfirmUpdate => {
                let PanelState::Open(draft) = std::mem::take(&mut self.panel) else {
                    return;
                };
                if let LoadState::Populated(groups) = &mut self.load {
                    if let Some(group) = groups.iter_mut().find(|group| group.tour_id == draft.tour_id) {
                        group.remark = draft.remark;
                        group.status = draft.status;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::{normalize, ExpenseRecord};
    use crate::generation::RequestGeneration;
    use serde_json::json;

    fn group_for(tour_id: &str, amounts: &[i64], filter: FilterWindow) -> TourExpenseGroup {
        let records: Vec<ExpenseRecord> = amounts
            .iter()
            .map(|amount| ExpenseRecord(json!({ "category": "Fuel", "amount": amount })))
            .collect();
        normalize(tour_id, &records, filter)
    }

    fn loaded_page(tour_id: &str) -> ExpensePageState {
        let mut generation = RequestGeneration::new();
        let mut state = ExpensePageState::new(Some(tour_id.to_string()), FilterWindow::LastMonth);
        let ticket = generation.issue();
        state.apply(ExpenseAction::FetchStarted(ticket));
        state.apply(ExpenseAction::FetchSucceeded {
            ticket,
            group: group_for(tour_id, &[100, 200], FilterWindow::LastMonth),
        });
        state
    }

    #[test]
    fn test_missing_tour_id_is_empty_without_fetch() {
        let state = ExpensePageState::new(None, FilterWindow::LastMonth);
        assert_eq!(state.load, LoadState::Empty);
        assert_eq!(state.fetch_query(), None);
    }

    #[test]
    fn test_loaded_group_is_expanded_by_default() {
        let state = loaded_page("T-1");
        assert_eq!(state.groups().len(), 1);
        assert_eq!(state.groups()[0].total_expense, 300.0);
        assert!(state.is_expanded("T-1"));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut state = loaded_page("T-1");
        let before = state.expanded.clone();

        state.apply(ExpenseAction::ToggleGroup("T-1".to_string()));
        assert!(!state.is_expanded("T-1"));
        state.apply(ExpenseAction::ToggleGroup("T-1".to_string()));
        assert_eq!(state.expanded, before);

        state.apply(ExpenseAction::ToggleGroup("other".to_string()));
        state.apply(ExpenseAction::ToggleGroup("other".to_string()));
        assert_eq!(state.expanded, before);
    }

    #[test]
    fn test_empty_response_shows_empty_state() {
        let mut state = ExpensePageState::new(Some("T-1".to_string()), FilterWindow::Today);
        let ticket = RequestGeneration::new().issue();
        state.apply(ExpenseAction::FetchStarted(ticket));
        state.apply(ExpenseAction::FetchSucceeded {
            ticket,
            group: group_for("T-1", &[], FilterWindow::Today),
        });
        assert_eq!(state.load, LoadState::Empty);
        assert!(state.groups().is_empty());
    }

    #[test]
    fn test_failed_fetch_matches_empty_state() {
        let mut state = ExpensePageState::new(Some("T-1".to_string()), FilterWindow::Today);
        let ticket = RequestGeneration::new().issue();
        state.apply(ExpenseAction::FetchStarted(ticket));
        state.apply(ExpenseAction::FetchFailed { ticket });
        assert_eq!(state.load, LoadState::Empty);
    }

    #[test]
    fn test_filter_change_requests_one_new_fetch_and_drops_old_rows() {
        let mut state = loaded_page("T-1");
        let before = state.fetch_query();

        state.apply(ExpenseAction::SetFilter(FilterWindow::LastThreeMonths));
        let after = state.fetch_query();
        assert_ne!(before, after);
        assert_eq!(after.as_ref().map(|query| query.filter), Some(FilterWindow::LastThreeMonths));
        assert!(state.is_loading());
        assert!(state.groups().is_empty());

        // Selecting the same filter again is not a change
        state.apply(ExpenseAction::SetFilter(FilterWindow::LastThreeMonths));
        assert_eq!(state.fetch_query(), after);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut generation = RequestGeneration::new();
        let mut state = ExpensePageState::new(Some("T-1".to_string()), FilterWindow::LastMonth);

        let month_ticket = generation.issue();
        state.apply(ExpenseAction::FetchStarted(month_ticket));
        state.apply(ExpenseAction::SetFilter(FilterWindow::Today));
        let today_ticket = generation.issue();
        state.apply(ExpenseAction::FetchStarted(today_ticket));

        // Today's response lands first, the slower month response after it
        state.apply(ExpenseAction::FetchSucceeded {
            ticket: today_ticket,
            group: group_for("T-1", &[50], FilterWindow::Today),
        });
        state.apply(ExpenseAction::FetchSucceeded {
            ticket: month_ticket,
            group: group_for("T-1", &[100, 200, 300], FilterWindow::LastMonth),
        });

        assert_eq!(state.groups().len(), 1);
        assert_eq!(state.groups()[0].filter, FilterWindow::Today);
        assert_eq!(state.groups()[0].total_expense, 50.0);
    }

    #[test]
    fn test_response_issued_before_filter_change_is_ignored() {
        let mut generation = RequestGeneration::new();
        let mut state = ExpensePageState::new(Some("T-1".to_string()), FilterWindow::LastMonth);

        let month_ticket = generation.issue();
        state.apply(ExpenseAction::FetchStarted(month_ticket));
        state.apply(ExpenseAction::SetFilter(FilterWindow::Today));

        // The month response lands before the today fetch has started
        state.apply(ExpenseAction::FetchSucceeded {
            ticket: month_ticket,
            group: group_for("T-1", &[100, 200], FilterWindow::LastMonth),
        });
        assert!(state.is_loading());
        assert!(state.groups().is_empty());

        state.apply(ExpenseAction::FetchFailed { ticket: month_ticket });
        assert!(state.is_loading());
    }

    #[test]
    fn test_expanded_set_follows_loaded_tour() {
        let mut generation = RequestGeneration::new();
        let mut state = loaded_page("T-1");

        state.apply(ExpenseAction::Navigate(Some("T-2".to_string())));
        let ticket = generation.issue();
        state.apply(ExpenseAction::FetchStarted(ticket));
        state.apply(ExpenseAction::FetchSucceeded {
            ticket,
            group: group_for("T-2", &[75], FilterWindow::LastMonth),
        });

        assert!(state.is_expanded("T-2"));
        assert!(!state.is_expanded("T-1"));
        assert_eq!(state.expanded.len(), 1);

        // An empty result leaves nothing expanded
        state.apply(ExpenseAction::SetFilter(FilterWindow::Today));
        let ticket = generation.issue();
        state.apply(ExpenseAction::FetchStarted(ticket));
        state.apply(ExpenseAction::FetchSucceeded {
            ticket,
            group: group_for("T-2", &[], FilterWindow::Today),
        });
        assert!(state.expanded.is_empty());
    }

    #[test]
    fn test_navigate_resets_page() {
        let mut state = loaded_page("T-1");
        state.apply(ExpenseAction::OpenPanel("T-1".to_string()));

        state.apply(ExpenseAction::Navigate(Some("T-2".to_string())));
        assert!(state.is_loading());
        assert_eq!(state.panel, PanelState::Closed);
        assert_eq!(state.fetch_query().map(|query| query.tour_id), Some("T-2".to_string()));

        state.apply(ExpenseAction::Navigate(None));
        assert_eq!(state.load, LoadState::Empty);
        assert_eq!(state.fetch_query(), None);
    }

    #[test]
    fn test_panel_confirm_updates_local_group() {
        let mut state = loaded_page("T-1");
        state.apply(ExpenseAction::OpenPanel("T-1".to_string()));
        state.apply(ExpenseAction::EditRemark("Receipts verified".to_string()));
        state.apply(ExpenseAction::EditStatus(ReviewStatus::Approved));
        state.apply(ExpenseAction::ConfirmUpdate);

        assert_eq!(state.panel, PanelState::Closed);
        assert_eq!(state.groups()[0].remark, "Receipts verified");
        assert_eq!(state.groups()[0].status, ReviewStatus::Approved);
    }

    #[test]
    fn test_panel_dismiss_discards_drafts() {
        let mut state = loaded_page("T-1");
        state.apply(ExpenseAction::OpenPanel("T-1".to_string()));
        state.apply(ExpenseAction::EditStatus(ReviewStatus::Rejected));
        state.apply(ExpenseAction::ClosePanel);

        assert_eq!(state.groups()[0].status, ReviewStatus::Pending);

        // Unknown groups cannot be opened
        state.apply(ExpenseAction::OpenPanel("nope".to_string()));
        assert_eq!(state.panel, PanelState::Closed);
    }
}
