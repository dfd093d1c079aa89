use std::rc::Rc;

use shared::{
    normalize_with_offset, ExpenseAction, ExpensePageState, ExpenseRecord, FilterWindow,
    RequestGeneration, ReviewStatus,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_toast::{use_toast, ToastVariant};
use crate::services::api::GatewayClient;
use crate::services::date_utils::browser_offset;
use crate::services::logging::Logger;

/// Reducer wrapper so the page state machine can drive `use_reducer`
#[derive(Clone, PartialEq)]
pub struct ExpensePageStore(pub ExpensePageState);

impl Reducible for ExpensePageStore {
    type Action = ExpenseAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(ExpensePageStore(next))
    }
}

pub struct UseTourExpensesResult {
    pub state: ExpensePageState,
    pub actions: UseTourExpensesActions,
}

#[derive(Clone)]
pub struct UseTourExpensesActions {
    pub set_filter: Callback<FilterWindow>,
    pub toggle_group: Callback<String>,
    pub open_panel: Callback<String>,
    pub edit_remark: Callback<String>,
    pub edit_status: Callback<ReviewStatus>,
    pub close_panel: Callback<()>,
    pub confirm_update: Callback<()>,
}

/// Expense groups for one tour, refetched whenever the tour or filter changes.
///
/// Every fetch takes a ticket from a request generation; a response that
/// arrives after a newer request was issued is dropped.
#[hook]
pub fn use_tour_expenses(api_client: &GatewayClient, tour_id: Option<String>) -> UseTourExpensesResult {
    let page = {
        let tour_id = tour_id.clone();
        use_reducer(move || ExpensePageStore(ExpensePageState::new(tour_id, FilterWindow::default())))
    };
    let generation = use_mut_ref(RequestGeneration::new);
    let toast = use_toast();

    {
        let dispatcher = page.dispatcher();
        use_effect_with(tour_id, move |tour_id| {
            dispatcher.dispatch(ExpenseAction::Navigate(tour_id.clone()));
            || ()
        });
    }

    {
        let api_client = api_client.clone();
        let dispatcher = page.dispatcher();
        let generation = generation.clone();

        use_effect_with(page.0.fetch_query(), move |query| {
            if let Some(query) = query.clone() {
                let ticket = generation.borrow_mut().issue();
                dispatcher.dispatch(ExpenseAction::FetchStarted(ticket));

                spawn_local(async move {
                    let result = api_client.get_expenses(&query).await;
                    if !generation.borrow().is_current(ticket) {
                        Logger::debug_with_component(
                            "use-tour-expenses",
                            &format!("Dropping superseded getExpenses response for {}", query.tour_id),
                        );
                        return;
                    }

                    match result {
                        Ok(envelope) => {
                            let records: Vec<ExpenseRecord> =
                                envelope.into_list().into_iter().map(ExpenseRecord).collect();
                            let group =
                                normalize_with_offset(&query.tour_id, &records, query.filter, browser_offset());
                            dispatcher.dispatch(ExpenseAction::FetchSucceeded { ticket, group });
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "use-tour-expenses",
                                &format!("Failed to fetch expenses for {}: {}", query.tour_id, e),
                            );
                            dispatcher.dispatch(ExpenseAction::FetchFailed { ticket });
                        }
                    }
                });
            }
            || ()
        });
    }

    let dispatcher = page.dispatcher();
    let actions = UseTourExpensesActions {
        set_filter: {
            let dispatcher = dispatcher.clone();
            Callback::from(move |filter: FilterWindow| dispatcher.dispatch(ExpenseAction::SetFilter(filter)))
        },
        toggle_group: {
            let dispatcher = dispatcher.clone();
            Callback::from(move |tour_id: String| dispatcher.dispatch(ExpenseAction::ToggleGroup(tour_id)))
        },
        open_panel: {
            let dispatcher = dispatcher.clone();
            Callback::from(move |tour_id: String| dispatcher.dispatch(ExpenseAction::OpenPanel(tour_id)))
        },
        edit_remark: {
            let dispatcher = dispatcher.clone();
            Callback::from(move |remark: String| dispatcher.dispatch(ExpenseAction::EditRemark(remark)))
        },
        edit_status: {
            let dispatcher = dispatcher.clone();
            Callback::from(move |status: ReviewStatus| dispatcher.dispatch(ExpenseAction::EditStatus(status)))
        },
        close_panel: {
            let dispatcher = dispatcher.clone();
            Callback::from(move |_: ()| dispatcher.dispatch(ExpenseAction::ClosePanel))
        },
        confirm_update: Callback::from(move |_: ()| {
            dispatcher.dispatch(ExpenseAction::ConfirmUpdate);
            toast.toast(
                "Updated locally",
                Some("Remark and status are kept in this view only."),
                ToastVariant::Default,
            );
        }),
    };

    UseTourExpensesResult {
        state: page.0.clone(),
        actions,
    }
}
