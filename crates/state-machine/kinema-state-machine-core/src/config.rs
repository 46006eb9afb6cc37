//! Instance configuration.

use serde::{Deserialize, Serialize};

/// When a trigger condition spends its trigger.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TriggerConsumption {
    /// Every trigger condition that evaluates true resets its trigger, even if
    /// a later condition of the same transition fails or the transition is
    /// not taken. This is the runtime format's established behavior.
    #[default]
    PerCondition,
    /// Triggers are reset only when the transition that tested them fires.
    PerTransition,
}

/// Configuration for state machine instances.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Initial capacity of the per-advance change log.
    pub change_log_capacity: usize,
    pub trigger_consumption: TriggerConsumption,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            change_log_capacity: 8,
            trigger_consumption: TriggerConsumption::PerCondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "triggerConsumption": "perTransition" }"#).unwrap();
        assert_eq!(cfg.trigger_consumption, TriggerConsumption::PerTransition);
        assert_eq!(cfg.change_log_capacity, Config::default().change_log_capacity);
    }
}
