use gloo::net::http::Request;
use serde_json::Value;
use shared::{
    functions, CallableErrorBody, CallableRequest, Envelope, ExpenseQuery, GatewayError,
    FUNCTIONS_PATH,
};

const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";

/// Master-data lists served by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterData {
    District,
    City,
    State,
    Designation,
}

impl MasterData {
    pub fn function_name(self) -> &'static str {
        match self {
            MasterData::District => functions::GET_DISTRICT,
            MasterData::City => functions::GET_CITY,
            MasterData::State => functions::GET_STATE,
            MasterData::Designation => functions::GET_DESIGNATION,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MasterData::District => "District",
            MasterData::City => "City",
            MasterData::State => "State",
            MasterData::Designation => "Designation",
        }
    }
}

/// Client for the callable function gateway
#[derive(Clone, PartialEq)]
pub struct GatewayClient {
    base_url: String,
}

impl GatewayClient {
    /// Create a client for the gateway configured at build time (`ASM_GATEWAY_URL`)
    pub fn new() -> Self {
        Self {
            base_url: option_env!("ASM_GATEWAY_URL")
                .unwrap_or(DEFAULT_GATEWAY_URL)
                .to_string(),
        }
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn function_url(&self, name: &str) -> String {
        format!("{}{}/{}", self.base_url(), FUNCTIONS_PATH, name)
    }

    /// Invoke a callable function.
    ///
    /// The payload travels as `{"data": payload}`; the reply is handed back as
    /// an [`Envelope`] for the caller to unwrap.
    pub async fn invoke(&self, name: &str, payload: Option<Value>) -> Result<Envelope, GatewayError> {
        let body = CallableRequest {
            data: payload.unwrap_or(Value::Null),
        };

        let request = Request::post(&self.function_url(name))
            .json(&body)
            .map_err(|e| GatewayError::Encode {
                function: name.to_string(),
                message: e.to_string(),
            })?;

        match request.send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Value>().await {
                        Ok(body) => Ok(Envelope::from_callable_body(body)),
                        Err(e) => Err(GatewayError::Decode {
                            function: name.to_string(),
                            message: e.to_string(),
                        }),
                    }
                } else {
                    let status = response.status();
                    let error_text = response.text().await.unwrap_or_default();
                    Err(GatewayError::Remote {
                        function: name.to_string(),
                        status,
                        message: remote_error_message(&error_text, response.status_text()),
                    })
                }
            }
            Err(e) => Err(GatewayError::Network {
                function: name.to_string(),
                message: e.to_string(),
            }),
        }
    }

    pub async fn get_tour(&self) -> Result<Envelope, GatewayError> {
        self.invoke(functions::GET_TOUR, None).await
    }

    pub async fn get_expenses(&self, query: &ExpenseQuery) -> Result<Envelope, GatewayError> {
        let payload = serde_json::to_value(query).map_err(|e| GatewayError::Encode {
            function: functions::GET_EXPENSES.to_string(),
            message: e.to_string(),
        })?;
        self.invoke(functions::GET_EXPENSES, Some(payload)).await
    }

    pub async fn get_survey(&self, payload: Value) -> Result<Envelope, GatewayError> {
        self.invoke(functions::GET_SURVEY, Some(payload)).await
    }

    pub async fn get_master_data(&self, kind: MasterData) -> Result<Envelope, GatewayError> {
        self.invoke(kind.function_name(), None).await
    }

    pub async fn get_district(&self) -> Result<Envelope, GatewayError> {
        self.get_master_data(MasterData::District).await
    }

    pub async fn get_city(&self) -> Result<Envelope, GatewayError> {
        self.get_master_data(MasterData::City).await
    }

    pub async fn get_state(&self) -> Result<Envelope, GatewayError> {
        self.get_master_data(MasterData::State).await
    }

    pub async fn get_designation(&self) -> Result<Envelope, GatewayError> {
        self.get_master_data(MasterData::Designation).await
    }
}

impl Default for GatewayClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Message of a callable error body, else the raw text, else the status text
fn remote_error_message(body: &str, status_text: String) -> String {
    if let Ok(parsed) = serde_json::from_str::<CallableErrorBody>(body) {
        return parsed.error.message;
    }
    if body.trim().is_empty() {
        status_text
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_url() {
        let client = GatewayClient::with_base_url("http://gateway.local/".to_string());
        assert_eq!(
            client.function_url(functions::GET_EXPENSES),
            "http://gateway.local/api/functions/getExpenses"
        );
    }

    #[test]
    fn test_master_data_function_names() {
        assert_eq!(MasterData::District.function_name(), "getDistrict");
        assert_eq!(MasterData::City.function_name(), "getCity");
        assert_eq!(MasterData::State.function_name(), "getState");
        assert_eq!(MasterData::Designation.function_name(), "getDesignation");
    }

    #[test]
    fn test_remote_error_message() {
        let body = r#"{"error":{"status":"NOT_FOUND","message":"no function getFoo"}}"#;
        assert_eq!(remote_error_message(body, "Not Found".to_string()), "no function getFoo");
        assert_eq!(remote_error_message("boom", "Bad Gateway".to_string()), "boom");
        assert_eq!(remote_error_message("", "Bad Gateway".to_string()), "Bad Gateway");
    }
}
