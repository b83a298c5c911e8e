//! Event record published to the sidecar.
//!
//! Wire shape:
//! `{"eventName": "neworder", "data": {"orderId": 1}, "to": ["<destination>"]}`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event name used by every built-in preset
pub const NEW_ORDER_EVENT: &str = "neworder";

/// Order id carried in `data.orderId`.
///
/// Counter ids serialize as JSON numbers, literal ids as JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Counter(u64),
    Literal(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Counter(n) => write!(f, "{}", n),
            OrderId::Literal(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub order_id: OrderId,
}

/// One event, built fresh for every loop iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_name: String,
    pub data: OrderData,
    pub to: Vec<String>,
}

impl EventRecord {
    /// Create an event addressed to a single destination
    pub fn new(event_name: impl Into<String>, order_id: OrderId, destination: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            data: OrderData { order_id },
            to: vec![destination.into()],
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.data.order_id
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
