use shared::{FilterWindow, PanelState};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::expense_group::ExpenseGroup;
use crate::components::remark_panel::RemarkPanel;
use crate::hooks::use_master_data::use_master_data;
use crate::hooks::use_tour_expenses::use_tour_expenses;
use crate::services::api::{GatewayClient, MasterData};

pub const EMPTY_MESSAGE: &str = "No expenses found for this tour";

#[derive(Properties, PartialEq)]
pub struct ExpensesPageProps {
    pub api_client: GatewayClient,
    pub tour_id: Option<String>,
}

#[function_component(ExpensesPage)]
pub fn expenses_page(props: &ExpensesPageProps) -> Html {
    let expenses = use_tour_expenses(&props.api_client, props.tour_id.clone());
    let districts = use_master_data(&props.api_client, MasterData::District);
    let district = use_state(|| Option::<String>::None);

    let state = &expenses.state;
    let actions = &expenses.actions;

    let on_filter_change = {
        let set_filter = actions.set_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let code = select.value().parse::<u8>().ok();
            if let Some(filter) = code.and_then(FilterWindow::from_code) {
                set_filter.emit(filter);
            }
        })
    };

    // District is a view-side choice; getExpenses has no district parameter
    let on_district_change = {
        let district = district.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            district.set((!value.is_empty()).then_some(value));
        })
    };

    let body = if state.is_loading() {
        html! { <div class="loading">{"Loading expenses..."}</div> }
    } else if state.groups().is_empty() {
        html! { <div class="empty-state">{EMPTY_MESSAGE}</div> }
    } else {
        html! {
            <div class="expense-groups">
                {for state.groups().iter().map(|group| html! {
                    <ExpenseGroup
                        key={group.tour_id.clone()}
                        group={group.clone()}
                        expanded={state.is_expanded(&group.tour_id)}
                        on_toggle={actions.toggle_group.clone()}
                        on_remark={actions.open_panel.clone()}
                    />
                })}
            </div>
        }
    };

    html! {
        <div class="expenses-page">
            <div class="page-header">
                <h2>{"ASM Survey Expenses"}</h2>
                <div class="page-filters">
                    <select class="filter-select" onchange={on_district_change}>
                        <option value="" selected={district.is_none()}>{"District"}</option>
                        {for districts.iter().map(|name| html! {
                            <option
                                value={name.clone()}
                                selected={district.as_deref() == Some(name.as_str())}
                            >
                                {name}
                            </option>
                        })}
                    </select>
                    <select class="filter-select" onchange={on_filter_change}>
                        {for FilterWindow::ALL.iter().map(|filter| html! {
                            <option
                                value={filter.code().to_string()}
                                selected={*filter == state.filter}
                            >
                                {filter.label()}
                            </option>
                        })}
                    </select>
                </div>
            </div>

            {body}

            {match &state.panel {
                PanelState::Open(draft) => html! {
                    <RemarkPanel
                        draft={draft.clone()}
                        on_remark_change={actions.edit_remark.clone()}
                        on_status_change={actions.edit_status.clone()}
                        on_close={actions.close_panel.clone()}
                        on_confirm={actions.confirm_update.clone()}
                    />
                },
                PanelState::Closed => html! {},
            }}
        </div>
    }
}
