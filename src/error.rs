use serde::Deserialize;

/// Error envelope the DCMS backend wraps every failure in.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorObject,
}

#[derive(Debug, Deserialize)]
pub struct ErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Network-level failure: DNS, connect, timeout, broken body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. Covers validation
    /// failures and not-found on delete-by-id alike.
    #[error("server error {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not match the expected wire shape (including
    /// unrecognized status values, which are rejected at the boundary).
    #[error("invalid response payload: {0}")]
    Decode(String),

    /// Request rejected client-side before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ChartError {
    /// Build an `Api` error from a raw status and body, decoding the
    /// platform envelope when the body carries one.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(env) => ChartError::Api {
                status,
                code: env.error.code,
                message: env.error.message,
            },
            Err(_) => ChartError::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: body.trim().to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ChartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChartError::Decode(err.to_string())
        } else {
            ChartError::Transport(err.to_string())
        }
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
