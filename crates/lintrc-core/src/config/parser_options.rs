//! Parser options
//!
//! `ecmaVersion` and `sourceType` are validated; any other option is passed
//! through to the engine untouched.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::LintrcError;
use crate::result::Result;

/// First edition published with a year-based name (ES6 = ES2015)
const FIRST_YEARLY_EDITION: u64 = 6;
const FIRST_EDITION_YEAR: u64 = 2015;
/// Highest edition number accepted in short form (16 = ES2025)
const LAST_SHORT_EDITION: u64 = 16;

/// Language version the parser should accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcmaVersion {
    /// Most recent version the parser supports
    Latest,
    /// ES3 or ES5
    Legacy(u8),
    /// Year-named edition, e.g. 2021
    Year(u16),
}

impl EcmaVersion {
    pub fn from_value(field_path: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s == "latest" => Ok(EcmaVersion::Latest),
            Value::Number(n) => match n.as_u64() {
                Some(3) => Ok(EcmaVersion::Legacy(3)),
                Some(5) => Ok(EcmaVersion::Legacy(5)),
                Some(v @ FIRST_YEARLY_EDITION..=LAST_SHORT_EDITION) => Ok(EcmaVersion::Year(
                    (v - FIRST_YEARLY_EDITION + FIRST_EDITION_YEAR) as u16,
                )),
                Some(year @ FIRST_EDITION_YEAR..=9999) => Ok(EcmaVersion::Year(year as u16)),
                _ => Err(LintrcError::config_error(
                    field_path,
                    format!("unsupported ecmaVersion {n}"),
                )),
            },
            other => Err(LintrcError::config_error(
                field_path,
                format!("ecmaVersion must be \"latest\" or a number, found {other}"),
            )),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            EcmaVersion::Latest => Value::String("latest".to_string()),
            EcmaVersion::Legacy(v) => Value::from(*v),
            EcmaVersion::Year(y) => Value::from(*y),
        }
    }
}

/// How the parser treats top-level code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Script,
    Module,
    Commonjs,
}

impl SourceType {
    fn from_value(field_path: &str, value: &Value) -> Result<Self> {
        match value.as_str() {
            Some("script") => Ok(SourceType::Script),
            Some("module") => Ok(SourceType::Module),
            Some("commonjs") => Ok(SourceType::Commonjs),
            _ => Err(LintrcError::config_error(
                field_path,
                format!("sourceType must be \"script\", \"module\" or \"commonjs\", found {value}"),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Script => "script",
            SourceType::Module => "module",
            SourceType::Commonjs => "commonjs",
        }
    }
}

/// Validated parser options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserOptions {
    pub ecma_version: Option<EcmaVersion>,
    pub source_type: Option<SourceType>,
    /// Options the resolver does not interpret
    pub extra: IndexMap<String, Value>,
}

impl ParserOptions {
    pub fn from_raw(field_path: &str, raw: &IndexMap<String, Value>) -> Result<Self> {
        let mut options = ParserOptions::default();
        for (key, value) in raw {
            let path = format!("{field_path}.{key}");
            match key.as_str() {
                "ecmaVersion" => options.ecma_version = Some(EcmaVersion::from_value(&path, value)?),
                "sourceType" => options.source_type = Some(SourceType::from_value(&path, value)?),
                _ => {
                    options.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(options)
    }

    pub fn is_empty(&self) -> bool {
        self.ecma_version.is_none() && self.source_type.is_none() && self.extra.is_empty()
    }

    /// Key-wise replacement: options set in `other` win
    pub fn overlay(&mut self, other: &ParserOptions) {
        if other.ecma_version.is_some() {
            self.ecma_version = other.ecma_version;
        }
        if other.source_type.is_some() {
            self.source_type = other.source_type;
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Raw form, as it would appear in a configuration file
    pub fn to_raw(&self) -> IndexMap<String, Value> {
        let mut raw = IndexMap::new();
        if let Some(version) = &self.ecma_version {
            raw.insert("ecmaVersion".to_string(), version.to_value());
        }
        if let Some(source_type) = &self.source_type {
            raw.insert(
                "sourceType".to_string(),
                Value::String(source_type.as_str().to_string()),
            );
        }
        for (key, value) in &self.extra {
            raw.insert(key.clone(), value.clone());
        }
        raw
    }
}

impl Serialize for ParserOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let raw = self.to_raw();
        let mut map = serializer.serialize_map(Some(raw.len()))?;
        for (key, value) in &raw {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
