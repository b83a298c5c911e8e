//! Publisher presets.
//!
//! Each preset fixes the event name, the single destination and how the
//! order id is produced. Built-ins cover the three demo targets; the config
//! file can add more or override them by name.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{OrderpubError, Result};
use crate::event::NEW_ORDER_EVENT;

pub const DEFAULT_PRESET: &str = "sns";

/// How `data.orderId` is produced on each iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderIdSource {
    /// 1, 2, 3, ... advanced once per iteration
    Counter,
    /// Same literal every iteration
    Fixed(String),
}

impl fmt::Display for OrderIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderIdSource::Counter => write!(f, "counter"),
            OrderIdSource::Fixed(s) => write!(f, "fixed \"{}\"", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub event_name: String,
    pub destination: String,
    pub order_id: OrderIdSource,
}

impl Preset {
    pub fn new(name: impl Into<String>, destination: impl Into<String>, order_id: OrderIdSource) -> Self {
        Self {
            name: name.into(),
            event_name: NEW_ORDER_EVENT.to_string(),
            destination: destination.into(),
            order_id,
        }
    }

    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = event_name.into();
        self
    }

    /// The built-in presets
    pub fn builtins() -> Vec<Preset> {
        vec![
            Preset::new(
                "sns",
                "arn:aws:sns:us-west-2:339936612855:neworder",
                OrderIdSource::Counter,
            ),
            Preset::new("queue", "neworder-queue", OrderIdSource::Counter),
            Preset::new("fixed", "neworder", OrderIdSource::Fixed("777".to_string())),
        ]
    }
}

/// Preset as written in the config file.
///
/// Leaving `order-id` unset selects the counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    #[serde(rename = "event-name")]
    pub event_name: Option<String>,

    pub destination: String,

    #[serde(rename = "order-id")]
    pub order_id: Option<String>,
}

impl PresetConfig {
    fn into_preset(self, name: &str) -> Result<Preset> {
        if self.destination.trim().is_empty() {
            return Err(OrderpubError::InvalidConfig(format!(
                "preset {} has no destination",
                name
            )));
        }

        let order_id = match self.order_id {
            Some(literal) => OrderIdSource::Fixed(literal),
            None => OrderIdSource::Counter,
        };

        let preset = Preset::new(name, self.destination, order_id);
        Ok(match self.event_name {
            Some(event_name) => preset.with_event_name(event_name),
            None => preset,
        })
    }
}

/// Named presets, ordered by name
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: BTreeMap<String, Preset>,
}

impl PresetRegistry {
    pub fn builtin() -> Self {
        let presets = Preset::builtins()
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        Self { presets }
    }

    /// Built-ins plus config presets; config wins on name clashes
    pub fn with_overrides(overrides: &HashMap<String, PresetConfig>) -> Result<Self> {
        let mut registry = Self::builtin();
        for (name, cfg) in overrides {
            let preset = cfg.clone().into_preset(name)?;
            if registry.presets.insert(name.clone(), preset).is_some() {
                log::info!("Preset {} overridden by config", name);
            }
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Result<&Preset> {
        self.presets.get(name).ok_or_else(|| OrderpubError::UnknownPreset {
            name: name.to_string(),
            known: self.names().join(", "),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let registry = PresetRegistry::builtin();
        assert_eq!(registry.names().len(), 3);
        assert_eq!(registry.names(), vec!["fixed", "queue", "sns"]);
    }

    #[test]
    fn test_default_preset_exists() {
        let registry = PresetRegistry::builtin();
        let preset = registry.get(DEFAULT_PRESET).unwrap();
        assert_eq!(preset.order_id, OrderIdSource::Counter);
        assert_eq!(preset.destination, "arn:aws:sns:us-west-2:339936612855:neworder");
        assert_eq!(preset.event_name, "neworder");
    }

    #[test]
    fn test_fixed_preset_literal() {
        let registry = PresetRegistry::builtin();
        let preset = registry.get("fixed").unwrap();
        assert_eq!(preset.order_id, OrderIdSource::Fixed("777".to_string()));
    }

    #[test]
    fn test_unknown_preset() {
        let registry = PresetRegistry::builtin();
        let err = registry.get("kafka").unwrap_err();
        match err {
            OrderpubError::UnknownPreset { name, known } => {
                assert_eq!(name, "kafka");
                assert_eq!(known, "fixed, queue, sns");
            }
            _ => panic!("Expected UnknownPreset"),
        }
    }

    #[test]
    fn test_config_preset_added() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "audit".to_string(),
            PresetConfig {
                event_name: Some("audit".to_string()),
                destination: "audit-topic".to_string(),
                order_id: None,
            },
        );

        let registry = PresetRegistry::with_overrides(&overrides).unwrap();
        assert_eq!(registry.names().len(), 4);
        let preset = registry.get("audit").unwrap();
        assert_eq!(preset.event_name, "audit");
        assert_eq!(preset.order_id, OrderIdSource::Counter);
    }

    #[test]
    fn test_config_preset_overrides_builtin() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "fixed".to_string(),
            PresetConfig {
                event_name: None,
                destination: "other".to_string(),
                order_id: Some("42".to_string()),
            },
        );

        let registry = PresetRegistry::with_overrides(&overrides).unwrap();
        assert_eq!(registry.names().len(), 3);
        let preset = registry.get("fixed").unwrap();
        assert_eq!(preset.destination, "other");
        assert_eq!(preset.order_id, OrderIdSource::Fixed("42".to_string()));
        assert_eq!(preset.event_name, "neworder");
    }

    #[test]
    fn test_config_preset_requires_destination() {
        let mut overrides = HashMap::new();
        overrides.insert("empty".to_string(), PresetConfig::default());

        let result = PresetRegistry::with_overrides(&overrides);
        assert!(matches!(result, Err(OrderpubError::InvalidConfig(_))));
    }

    #[test]
    fn test_order_id_source_display() {
        assert_eq!(OrderIdSource::Counter.to_string(), "counter");
        assert_eq!(OrderIdSource::Fixed("777".to_string()).to_string(), "fixed \"777\"");
    }
}
