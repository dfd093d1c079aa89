use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{GatewayClient, MasterData};
use crate::services::logging::Logger;

const LABEL_FIELDS: [&str; 4] = ["name", "label", "title", "value"];

/// Display label of one master-data entry: a plain string, or the first
/// non-empty name-like field of an object
pub fn master_label(entry: &Value) -> Option<String> {
    let text = match entry {
        Value::String(text) => Some(text.as_str()),
        Value::Object(fields) => LABEL_FIELDS
            .iter()
            .filter_map(|field| fields.get(*field).and_then(Value::as_str))
            .find(|text| !text.trim().is_empty()),
        _ => None,
    }?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Labels of a master-data list, fetched once on mount; empty on failure
#[hook]
pub fn use_master_data(api_client: &GatewayClient, kind: MasterData) -> Vec<String> {
    let labels = use_state(Vec::<String>::new);

    {
        let api_client = api_client.clone();
        let labels = labels.clone();
        use_effect_with(kind, move |kind| {
            let kind = *kind;
            spawn_local(async move {
                let result = match kind {
                    MasterData::District => api_client.get_district().await,
                    MasterData::City => api_client.get_city().await,
                    MasterData::State => api_client.get_state().await,
                    MasterData::Designation => api_client.get_designation().await,
                };
                match result {
                    Ok(envelope) => {
                        let fetched: Vec<String> = envelope.into_list().iter().filter_map(master_label).collect();
                        labels.set(fetched);
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "use-master-data",
                            &format!("Failed to load {} list: {}", kind.label(), e),
                        );
                    }
                }
            });
            || ()
        });
    }

    (*labels).clone()
}
