use shared::{TourCache, TourFetchOutcome, TourSummary};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_toast::{use_toast, ToastVariant};
use crate::services::api::GatewayClient;
use crate::services::date_utils::now_utc;
use crate::services::logging::Logger;
use crate::services::storage::LocalStorageStore;

#[derive(Clone, PartialEq)]
pub struct ToursState {
    pub tours: Vec<TourSummary>,
    pub loading: bool,
}

pub struct UseToursResult {
    pub state: ToursState,
    pub actions: UseToursActions,
}

#[derive(Clone)]
pub struct UseToursActions {
    pub refresh: Callback<()>,
}

fn tour_cache() -> TourCache<LocalStorageStore> {
    TourCache::new(LocalStorageStore)
}

/// Read the cached list, logging and ignoring storage faults
fn load_cached_tours() -> Vec<TourSummary> {
    match tour_cache().load(now_utc()) {
        Ok(Some(tours)) => tours,
        Ok(None) => Vec::new(),
        Err(e) => {
            Logger::warn_with_component("use-tours", &format!("Ignoring unreadable tour cache: {}", e));
            Vec::new()
        }
    }
}

/// Toast for a failed tour fetch; the silent mount load raises none
fn failure_notice(notify: bool) -> Option<(&'static str, &'static str, ToastVariant)> {
    notify.then_some((
        "Could not refresh tours",
        "Showing the last saved list.",
        ToastVariant::Destructive,
    ))
}

/// Tour list for the ASM survey page.
///
/// Renders the cached list first, then replaces it with a fresh `getTour`
/// result and writes that back to the cache. A failed fetch keeps whatever
/// was cached; only a manual refresh reports the failure as a toast.
#[hook]
pub fn use_tours(api_client: &GatewayClient) -> UseToursResult {
    let tours = use_state(load_cached_tours);
    let loading = use_state(|| true);
    let toast = use_toast();

    let fetch = {
        let api_client = api_client.clone();
        let tours = tours.clone();
        let loading = loading.clone();

        use_callback(toast, move |notify: bool, toast| {
            let api_client = api_client.clone();
            let tours = tours.clone();
            let loading = loading.clone();
            let toast = toast.clone();

            loading.set(true);
            spawn_local(async move {
                let result = api_client.get_tour().await;
                match tour_cache().apply_fetch(result, now_utc()) {
                    TourFetchOutcome::Replaced {
                        tours: fresh,
                        skipped,
                        cache_error,
                    } => {
                        if skipped > 0 {
                            Logger::warn_with_component(
                                "use-tours",
                                &format!("Skipped {} undecodable tour entries", skipped),
                            );
                        }
                        if let Some(e) = cache_error {
                            Logger::warn_with_component("use-tours", &format!("Failed to cache tours: {}", e));
                        }
                        Logger::info_with_component("use-tours", &format!("Loaded {} tours", fresh.len()));
                        tours.set(fresh);
                    }
                    TourFetchOutcome::NotAList(shape) => {
                        Logger::warn_with_component(
                            "use-tours",
                            &format!("getTour returned no list ({:?} shape), keeping cached tours", shape),
                        );
                    }
                    TourFetchOutcome::Failed(e) => {
                        Logger::error_with_component("use-tours", &format!("Failed to fetch tours: {}", e));
                        if let Some((title, description, variant)) = failure_notice(notify) {
                            toast.toast(title, Some(description), variant);
                        }
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with((), move |_| {
            fetch.emit(false);
            || ()
        });
    }

    let refresh = Callback::from(move |_: ()| fetch.emit(true));

    UseToursResult {
        state: ToursState {
            tours: (*tours).clone(),
            loading: *loading,
        },
        actions: UseToursActions { refresh },
    }
}
