//! Rule package: the rule list plus weights handed to the export step.

use serde::{Deserialize, Serialize};

use super::{Rule, Weights};
use crate::error::DecodeError;

/// Body of `rules.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulePackage {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub weights: Weights,
}

impl RulePackage {
    pub fn new(rules: Vec<Rule>, weights: Weights) -> Self {
        Self { rules, weights }
    }

    /// Pretty-printed JSON (two-space indent).
    pub fn to_json(&self) -> Result<String, DecodeError> {
        serde_json::to_string_pretty(self).map_err(|e| DecodeError::json("rule package", e))
    }

    /// Decodes a package. A bare rule array is accepted with default weights.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DecodeError::json("rule package", e))?;
        match value {
            serde_json::Value::Array(_) => {
                let rules = serde_json::from_value(value)
                    .map_err(|e| DecodeError::json("rule list", e))?;
                Ok(Self {
                    rules,
                    weights: Weights::default(),
                })
            }
            serde_json::Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| DecodeError::json("rule package", e))
            }
            other => Err(DecodeError::Unsupported(format!(
                "expected an object or array, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightPreset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_package_json_round_trip() {
        let pkg = RulePackage::new(
            vec![Rule::co_run(["T1", "T2"]), Rule::global_precedence(3)],
            Weights::preset(WeightPreset::MaximizeFulfillment),
        );
        let text = pkg.to_json().unwrap();
        assert!(text.contains("\"type\": \"coRun\""));
        assert_eq!(RulePackage::from_json(&text).unwrap(), pkg);
    }

    #[test]
    fn test_bare_rule_array_gets_default_weights() {
        let pkg = RulePackage::from_json(r#"[{"type":"coRun","tasks":["A","B"]}]"#).unwrap();
        assert_eq!(pkg.rules, vec![Rule::co_run(["A", "B"])]);
        assert_eq!(pkg.weights, Weights::default());
    }

    #[test]
    fn test_malformed_package_errors() {
        assert!(matches!(
            RulePackage::from_json("{oops"),
            Err(DecodeError::Json { .. })
        ));
        assert!(matches!(
            RulePackage::from_json("42"),
            Err(DecodeError::Unsupported(_))
        ));
        assert!(matches!(
            RulePackage::from_json(r#"[{"type":"teleport"}]"#),
            Err(DecodeError::Json { what: "rule list", .. })
        ));
    }
}
