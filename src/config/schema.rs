use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::policy::EventPolicy;

/// On-disk configuration.
///
/// Example YAML:
/// ```yaml
/// events:
///   3x3:
///     attempts: 5
///     method: average_of5
///     format: standard
///   8x8:
///     attempts: 3
///     method: mean_of3
///     format: extended
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Event policies that add to or replace the built-in table.
    #[serde(default)]
    pub events: BTreeMap<String, EventPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::policy::{ScoringMethod, ValueFormat};

    #[test]
    fn test_empty_config_parses() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.events.is_empty());
    }

    #[test]
    fn test_event_override_parses() {
        let yaml = r#"
events:
  8x8:
    attempts: 3
    method: mean_of3
    format: extended
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let policy = config.events.get("8x8").unwrap();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.method, ScoringMethod::MeanOf3);
        assert_eq!(policy.format, ValueFormat::Extended);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "queries: []\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
