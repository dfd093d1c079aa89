use thiserror::Error;

/// Failure of a callable function invocation.
///
/// Callers are expected to catch every variant the same way (log and fall
/// back to an empty view); the variants exist for log messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("failed to encode payload for {function}: {message}")]
    Encode { function: String, message: String },

    #[error("network error calling {function}: {message}")]
    Network { function: String, message: String },

    #[error("{function} failed with status {status}: {message}")]
    Remote {
        function: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {function}: {message}")]
    Decode { function: String, message: String },
}

impl GatewayError {
    pub fn function(&self) -> &str {
        match self {
            GatewayError::Encode { function, .. }
            | GatewayError::Network { function, .. }
            | GatewayError::Remote { function, .. }
            | GatewayError::Decode { function, .. } => function,
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("failed to serialize cache entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_messages() {
        let err = GatewayError::Remote {
            function: "getExpenses".to_string(),
            status: 404,
            message: "unknown tour".to_string(),
        };
        assert_eq!(err.to_string(), "getExpenses failed with status 404: unknown tour");
        assert_eq!(err.function(), "getExpenses");
    }
}
