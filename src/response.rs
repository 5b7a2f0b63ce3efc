//! JSON error envelopes. Endpoints answer either `{"error": ..}` or `{"errors": [..]}`.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorEnvelope {
    Single { error: String },
    Many { errors: Vec<String> },
}

impl ErrorEnvelope {
    pub fn single(error: impl Into<String>) -> Self {
        ErrorEnvelope::Single { error: error.into() }
    }

    pub fn many(errors: Vec<String>) -> Self {
        ErrorEnvelope::Many { errors }
    }
}
