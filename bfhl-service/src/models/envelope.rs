use serde::Serialize;

/// Uniform response wrapper. `data` and `error` are mutually exclusive and
/// both absent on the health response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BfhlData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(official_email: &str, data: BfhlData) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(official_email: &str, error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.to_string(),
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn healthy(official_email: &str) -> Self {
        Self {
            is_success: true,
            official_email: official_email.to_string(),
            data: None,
            error: None,
        }
    }
}

/// Result payload, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BfhlData {
    Sequence(Vec<u64>),
    Primes(Vec<i64>),
    Number(u64),
    Text(String),
}
