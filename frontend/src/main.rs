use gloo::history::{BrowserHistory, History};
use yew::prelude::*;

mod components;
mod hooks;
mod pages;
mod routes;
mod services;

use components::dashboard_layout::DashboardLayout;
use components::toaster::Toaster;
use hooks::use_toast::ToastProvider;
use pages::asm_survey::AsmSurveyPage;
use pages::expenses::ExpensesPage;
use pages::placeholder::PlaceholderPage;
use pages::survey_details::SurveyDetailsPage;
use routes::{Route, TourQuery};
use services::api::GatewayClient;

#[derive(Clone, PartialEq)]
struct CurrentLocation {
    path: String,
    tour_id: Option<String>,
}

impl CurrentLocation {
    fn read() -> Self {
        let location = BrowserHistory::new().location();
        Self {
            path: location.path().to_string(),
            tour_id: TourQuery::current().tour_id,
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| GatewayClient::new());
    let location = use_state(CurrentLocation::read);

    // Follow pushes and back/forward navigation
    {
        let location = location.clone();
        use_effect_with((), move |_| {
            let listener = BrowserHistory::new().listen(move || location.set(CurrentLocation::read()));
            move || drop(listener)
        });
    }

    let api_client = (*api_client).clone();
    let tour_id = location.tour_id.clone();

    let page = match Route::recognize(&location.path) {
        Route::AsmSurvey => html! { <AsmSurveyPage {api_client} /> },
        Route::Expenses => html! { <ExpensesPage {api_client} {tour_id} /> },
        Route::SurveyDetails => html! { <SurveyDetailsPage {api_client} {tour_id} /> },
        Route::Location => html! { <PlaceholderPage title="Tour Location" {tour_id} /> },
        Route::Login => {
            return html! {
                <ToastProvider>
                    <PlaceholderPage title="Login" />
                    <Toaster />
                </ToastProvider>
            };
        }
        Route::NotFound => html! { <PlaceholderPage title="Page not found" /> },
    };

    html! {
        <ToastProvider>
            <DashboardLayout current_path={location.path.clone()}>
                {page}
            </DashboardLayout>
            <Toaster />
        </ToastProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
