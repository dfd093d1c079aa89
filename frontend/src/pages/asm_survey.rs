use shared::{partition_tours, TourStats, TourSummary, TourTab};
use yew::prelude::*;

use crate::components::stat_cards::StatCards;
use crate::components::tour_table::TourTable;
use crate::hooks::use_tours::use_tours;
use crate::services::api::GatewayClient;
use crate::services::date_utils::browser_offset;

#[derive(Properties, PartialEq)]
pub struct AsmSurveyPageProps {
    pub api_client: GatewayClient,
}

#[function_component(AsmSurveyPage)]
pub fn asm_survey_page(props: &AsmSurveyPageProps) -> Html {
    let tours = use_tours(&props.api_client);
    let active_tab = use_state(TourTab::default);

    let all_tours = &tours.state.tours;
    let visible: Vec<TourSummary> = partition_tours(all_tours, *active_tab).into_iter().cloned().collect();
    let on_refresh = {
        let refresh = tours.actions.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    html! {
        <>
            <StatCards stats={TourStats::from_tours(all_tours)} />

            <section class="survey-section">
                <div class="section-header">
                    <h2>{"Recent Survey"}</h2>
                    <button class="row-action" onclick={on_refresh} disabled={tours.state.loading}>
                        {"Refresh"}
                    </button>
                </div>

                <div class="tabs">
                    {for TourTab::ALL.iter().map(|tab| {
                        let tab = *tab;
                        let class = if tab == *active_tab { "tab active" } else { "tab" };
                        let onclick = {
                            let active_tab = active_tab.clone();
                            Callback::from(move |_: MouseEvent| active_tab.set(tab))
                        };
                        html! { <button key={tab.label()} {class} {onclick}>{tab.label()}</button> }
                    })}
                </div>

                <TourTable
                    tours={visible}
                    has_tours={!all_tours.is_empty()}
                    loading={tours.state.loading}
                    offset={browser_offset()}
                />
            </section>
        </>
    }
}
