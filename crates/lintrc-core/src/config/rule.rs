//! Rule severities and rule settings
//!
//! A rule setting is written either as a bare severity (`"error"`, or the
//! numeric alias `2`) or as a list whose first element is the severity and
//! whose remaining elements are rule-specific parameters:
//!
//! ```json
//! {
//!   "no-console": "off",
//!   "semi": ["error", "always"],
//!   "max-len": ["error", { "code": 120 }]
//! }
//! ```

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::LintrcError;
use crate::result::Result;

/// Ordered mapping from rule name to its setting
pub type RuleMap = IndexMap<String, RuleSetting>;

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Disable the rule
    Off,
    /// Report violations without failing
    Warn,
    /// Report violations as errors
    Error,
}

impl Severity {
    /// Interpret a severity token, accepting the numeric aliases `0`, `1`, `2`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(token) => token.parse().ok(),
            Value::Number(n) => match n
                .as_u64()
                .or_else(|| integral_severity(n.as_f64()?))?
            {
                0 => Some(Severity::Off),
                1 => Some(Severity::Warn),
                2 => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Whether the rule runs at all
    pub fn is_enabled(&self) -> bool {
        *self != Severity::Off
    }
}

/// `2.0` in JSON or YAML is the same severity as `2`
fn integral_severity(value: f64) -> Option<u64> {
    (value.fract() == 0.0 && (0.0..=2.0).contains(&value)).then_some(value as u64)
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity '{other}' (expected \"off\", \"warn\" or \"error\")"
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated rule setting: severity plus rule-specific parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    severity: Severity,
    options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    /// Validate a raw rule value found at `field_path`
    pub fn from_value(field_path: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let (first, rest) = items.split_first().ok_or_else(|| {
                    LintrcError::malformed_rule(field_path, "empty list (expected a severity first)")
                })?;
                let severity = Severity::from_value(first).ok_or_else(|| {
                    LintrcError::malformed_rule(
                        field_path,
                        format!("first element {first} is not a severity token"),
                    )
                })?;
                Ok(Self::with_options(severity, rest.to_vec()))
            }
            Value::String(_) | Value::Number(_) => Severity::from_value(value)
                .map(Self::new)
                .ok_or_else(|| {
                    LintrcError::malformed_rule(
                        field_path,
                        format!("{value} is not a severity token"),
                    )
                }),
            other => Err(LintrcError::malformed_rule(
                field_path,
                format!(
                    "expected a severity or a list starting with one, found {}",
                    value_kind(other)
                ),
            )),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Rule-specific parameters following the severity
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// Canonical JSON form: bare token without parameters, list otherwise
    pub fn to_value(&self) -> Value {
        let token = Value::String(self.severity.as_str().to_string());
        if self.options.is_empty() {
            token
        } else {
            let mut items = Vec::with_capacity(self.options.len() + 1);
            items.push(token);
            items.extend(self.options.iter().cloned());
            Value::Array(items)
        }
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Validate every entry of a raw rule mapping, keeping declaration order
pub fn parse_rule_map(field_path: &str, raw: &IndexMap<String, Value>) -> Result<RuleMap> {
    raw.iter()
        .map(|(name, value)| {
            if name.trim().is_empty() {
                return Err(LintrcError::config_error(field_path, "rule name cannot be empty"));
            }
            let setting = RuleSetting::from_value(&format!("{field_path}.{name}"), value)?;
            Ok((name.clone(), setting))
        })
        .collect()
}

/// Convert a validated rule mapping back to raw values
pub fn rule_map_to_values(rules: &RuleMap) -> IndexMap<String, Value> {
    rules
        .iter()
        .map(|(name, setting)| (name.clone(), setting.to_value()))
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
