//! Type system configuration
//!
//! Everything the core matches by name lives here: the well-known type names
//! resolved at declaration time, the compile-time-only prefix, and the shape
//! of generated type names. Defaults reproduce the builtin DSL's conventions;
//! a driver may override them from TOML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::TypeError;

/// Well-known nominal types the core needs to recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WellKnown {
    /// `void`
    Void,
    /// `never`, the bottom type
    Never,
    /// `bool`
    Bool,
    /// `constexpr bool`
    ConstexprBool,
    /// `Object`
    Object,
    /// `Context`
    Context,
    /// `String`
    String,
    /// `Code`, the default function-pointer base
    Code,
    /// `intptr`
    Intptr,
    /// `constexpr Arguments`
    ConstexprArguments,
    /// `constexpr int31`
    ConstexprInt31,
    /// `constexpr int32`
    ConstexprInt32,
    /// `constexpr float64`
    ConstexprFloat64,
}

impl WellKnown {
    /// All well-known kinds
    pub const ALL: [WellKnown; 13] = [
        WellKnown::Void,
        WellKnown::Never,
        WellKnown::Bool,
        WellKnown::ConstexprBool,
        WellKnown::Object,
        WellKnown::Context,
        WellKnown::String,
        WellKnown::Code,
        WellKnown::Intptr,
        WellKnown::ConstexprArguments,
        WellKnown::ConstexprInt31,
        WellKnown::ConstexprInt32,
        WellKnown::ConstexprFloat64,
    ];

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WellKnown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Source-level names of the well-known types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WellKnownNames {
    /// Name of the void type
    pub void: String,
    /// Name of the never type
    pub never: String,
    /// Name of the bool type
    pub bool: String,
    /// Name of the constexpr bool type
    pub constexpr_bool: String,
    /// Name of the object type
    pub object: String,
    /// Name of the context type
    pub context: String,
    /// Name of the string type
    pub string: String,
    /// Name of the code type
    pub code: String,
    /// Name of the intptr type
    pub intptr: String,
    /// Name of the constexpr arguments type
    pub constexpr_arguments: String,
    /// Name of the constexpr int31 type
    pub constexpr_int31: String,
    /// Name of the constexpr int32 type
    pub constexpr_int32: String,
    /// Name of the constexpr float64 type
    pub constexpr_float64: String,
}

impl WellKnownNames {
    /// Configured name for a well-known kind
    pub fn name(&self, kind: WellKnown) -> &str {
        match kind {
            WellKnown::Void => &self.void,
            WellKnown::Never => &self.never,
            WellKnown::Bool => &self.bool,
            WellKnown::ConstexprBool => &self.constexpr_bool,
            WellKnown::Object => &self.object,
            WellKnown::Context => &self.context,
            WellKnown::String => &self.string,
            WellKnown::Code => &self.code,
            WellKnown::Intptr => &self.intptr,
            WellKnown::ConstexprArguments => &self.constexpr_arguments,
            WellKnown::ConstexprInt31 => &self.constexpr_int31,
            WellKnown::ConstexprInt32 => &self.constexpr_int32,
            WellKnown::ConstexprFloat64 => &self.constexpr_float64,
        }
    }

    /// Reverse lookup used when a type is declared
    pub fn kind_of(&self, name: &str) -> Option<WellKnown> {
        WellKnown::ALL.into_iter().find(|&kind| self.name(kind) == name)
    }
}

impl Default for WellKnownNames {
    fn default() -> Self {
        Self {
            void: "void".to_string(),
            never: "never".to_string(),
            bool: "bool".to_string(),
            constexpr_bool: "constexpr bool".to_string(),
            object: "Object".to_string(),
            context: "Context".to_string(),
            string: "String".to_string(),
            code: "Code".to_string(),
            intptr: "intptr".to_string(),
            constexpr_arguments: "constexpr Arguments".to_string(),
            constexpr_int31: "constexpr int31".to_string(),
            constexpr_int32: "constexpr int32".to_string(),
            constexpr_float64: "constexpr float64".to_string(),
        }
    }
}

/// Generated name for a union with exactly these member representations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnionRepresentation {
    /// Generated TNode names of the members
    pub members: Vec<String>,
    /// Generated TNode name of the union
    pub name: String,
}

/// Configuration of a [`crate::TypeContext`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypeSystemConfig {
    /// Name prefix marking compile-time-only types
    pub constexpr_prefix: String,

    /// Template wrapping TNode names in generated type names (`TNode<...>`)
    pub generated_wrapper: String,

    /// Well-known kind used as the parent of every function pointer type
    pub function_pointer_base: WellKnownBase,

    /// Names of the well-known types
    pub well_known: WellKnownNames,

    /// Generated names for specific union shapes
    pub union_representations: Vec<UnionRepresentation>,
}

/// Which well-known type function pointers inherit from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WellKnownBase {
    /// `Code` objects of builtins
    #[default]
    Code,
    /// Plain `Object`
    Object,
}

impl From<WellKnownBase> for WellKnown {
    fn from(base: WellKnownBase) -> Self {
        match base {
            WellKnownBase::Code => WellKnown::Code,
            WellKnownBase::Object => WellKnown::Object,
        }
    }
}

impl Default for TypeSystemConfig {
    fn default() -> Self {
        Self {
            constexpr_prefix: "constexpr ".to_string(),
            generated_wrapper: "TNode".to_string(),
            function_pointer_base: WellKnownBase::Code,
            well_known: WellKnownNames::default(),
            union_representations: vec![
                UnionRepresentation {
                    members: vec!["Smi".to_string(), "HeapNumber".to_string()],
                    name: "Number".to_string(),
                },
                UnionRepresentation {
                    members: vec!["Smi".to_string(), "HeapNumber".to_string(), "BigInt".to_string()],
                    name: "Numeric".to_string(),
                },
            ],
        }
    }
}

impl TypeSystemConfig {
    /// Parse a configuration from TOML; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, TypeError> {
        let config: TypeSystemConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to TOML
    pub fn to_toml_string(&self) -> Result<String, TypeError> {
        toml::to_string_pretty(self).map_err(|e| TypeError::Config(e.to_string()))
    }

    /// Check that well-known names are distinct and non-empty
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.generated_wrapper.is_empty() {
            return Err(TypeError::Config("generated_wrapper must not be empty".to_string()));
        }
        for (i, &kind) in WellKnown::ALL.iter().enumerate() {
            let name = self.well_known.name(kind);
            if name.is_empty() {
                return Err(TypeError::Config(format!("well-known name for {} is empty", kind)));
            }
            if let Some(&other) = WellKnown::ALL[i + 1..]
                .iter()
                .find(|&&other| self.well_known.name(other) == name)
            {
                return Err(TypeError::Config(format!(
                    "{} and {} share the name '{}'",
                    kind, other, name
                )));
            }
        }
        Ok(())
    }

    /// Generated TNode name configured for this exact member set, if any
    pub(crate) fn union_representation(&self, members: &BTreeSet<String>) -> Option<&str> {
        self.union_representations
            .iter()
            .find(|repr| {
                let repr_members: BTreeSet<&String> = repr.members.iter().collect();
                repr_members.len() == members.len() && repr_members.into_iter().all(|m| members.contains(m))
            })
            .map(|repr| repr.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let config = TypeSystemConfig::default();
        assert_eq!(config.well_known.name(WellKnown::Never), "never");
        assert_eq!(config.well_known.kind_of("constexpr bool"), Some(WellKnown::ConstexprBool));
        assert_eq!(config.well_known.kind_of("Smi"), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TypeSystemConfig::from_toml_str(
            r#"
constexpr_prefix = "const "

[well_known]
never = "nothing"
"#,
        )
        .unwrap();

        assert_eq!(config.constexpr_prefix, "const ");
        assert_eq!(config.well_known.never, "nothing");
        assert_eq!(config.well_known.void, "void");
        assert_eq!(config.generated_wrapper, "TNode");
        assert_eq!(config.function_pointer_base, WellKnownBase::Code);
        assert_eq!(config.union_representations.len(), 2);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TypeSystemConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(TypeSystemConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_shared_names() {
        let err = TypeSystemConfig::from_toml_str(
            r#"
[well_known]
void = "never"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, TypeError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = TypeSystemConfig::from_toml_str("constexpr_prefix = ").unwrap_err();
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_union_representation_is_order_insensitive() {
        let config = TypeSystemConfig::default();
        let members: BTreeSet<String> = ["HeapNumber", "Smi"].iter().map(|s| s.to_string()).collect();
        assert_eq!(config.union_representation(&members), Some("Number"));
        let members: BTreeSet<String> = ["Smi", "String"].iter().map(|s| s.to_string()).collect();
        assert_eq!(config.union_representation(&members), None);
    }
}
