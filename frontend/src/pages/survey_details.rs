use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::GatewayClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct SurveyDetailsPageProps {
    pub api_client: GatewayClient,
    pub tour_id: Option<String>,
}

/// Survey entries recorded on a tour; only the count is shown here
#[function_component(SurveyDetailsPage)]
pub fn survey_details_page(props: &SurveyDetailsPageProps) -> Html {
    let survey_count = use_state(|| Option::<usize>::None);

    {
        let api_client = props.api_client.clone();
        let survey_count = survey_count.clone();
        use_effect_with(props.tour_id.clone(), move |tour_id| {
            if let Some(tour_id) = tour_id.clone() {
                survey_count.set(None);
                spawn_local(async move {
                    match api_client.get_survey(json!({ "tourId": tour_id })).await {
                        Ok(envelope) => survey_count.set(Some(envelope.into_list().len())),
                        Err(e) => {
                            Logger::error_with_component(
                                "survey-details",
                                &format!("Failed to fetch surveys for {}: {}", tour_id, e),
                            );
                            survey_count.set(Some(0));
                        }
                    }
                });
            }
            || ()
        });
    }

    html! {
        <div class="survey-details-page">
            <h2>{"Survey Details"}</h2>
            {match &props.tour_id {
                Some(tour_id) => html! {
                    <>
                        <p>{format!("Tour: {}", tour_id)}</p>
                        <p>
                            {match *survey_count {
                                Some(count) => format!("{} survey entries", count),
                                None => "Loading surveys...".to_string(),
                            }}
                        </p>
                    </>
                },
                None => html! { <p class="empty-state">{"No tour selected"}</p> },
            }}
        </div>
    }
}
