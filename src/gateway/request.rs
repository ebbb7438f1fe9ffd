//! Inbound request model

use serde_json::Value;
use std::collections::HashMap;

/// An inbound operation with its named text fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayRequest {
    fields: HashMap<String, String>,
}

impl GatewayRequest {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Build from query-string parameters
    pub fn from_query(params: HashMap<String, String>) -> Self {
        Self::new(params)
    }

    /// Build from a JSON body. Only string-valued top-level fields are kept;
    /// a missing or non-object body yields no fields.
    pub fn from_json(body: Option<Value>) -> Self {
        let fields = match body {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(text) => Some((key, text)),
                    _ => None,
                })
                .collect(),
            _ => HashMap::new(),
        };
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
