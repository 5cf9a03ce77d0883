//! Type system errors

use thiserror::Error;

/// Errors raised by the type context and the union algebra
///
/// Every variant except [`TypeError::Config`] is an invariant violation: it
/// points at a defect in the declaration layer or in the algebra itself, and
/// the compilation run must abort. Mismatches between user types are never
/// reported through this enum; they come back as `bool`/`Option` results.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// A nominal type was declared twice
    #[error("Duplicate type declaration: {name}")]
    DuplicateType {
        /// Type name
        name: String,
    },

    /// Undefined type reference
    #[error("Undefined type: {name}")]
    UndefinedType {
        /// Type name that was not found
        name: String,
    },

    /// Handle that does not belong to the context
    #[error("Invalid type handle: {id}")]
    InvalidTypeId {
        /// Raw handle value
        id: u32,
    },

    /// A well-known type required by an operation was never declared
    #[error("Well-known type '{name}' has not been declared")]
    MissingWellKnownType {
        /// Configured name of the well-known type
        name: String,
    },

    /// Two types whose parent chains end at different roots
    #[error("Types {a} and {b} have no common supertype")]
    NoCommonSupertype {
        /// First type
        a: String,
        /// Second type
        b: String,
    },

    /// A compile-time-only type was merged with a distinct type
    ///
    /// Raised for constexpr/runtime mixes and for two unrelated
    /// compile-time-only types alike.
    #[error("Compile-time-only types cannot be unioned: {union} | {member}")]
    ConstexprUnion {
        /// Union being extended
        union: String,
        /// Offending member
        member: String,
    },

    /// Invalid type system configuration
    #[error("Invalid type system configuration: {0}")]
    Config(String),
}

impl TypeError {
    /// Whether this error is a fatal invariant violation
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, TypeError::Config(_))
    }
}

impl From<toml::de::Error> for TypeError {
    fn from(err: toml::de::Error) -> Self {
        TypeError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TypeError::NoCommonSupertype {
            a: "int32".to_string(),
            b: "float64".to_string(),
        };
        assert_eq!(err.to_string(), "Types int32 and float64 have no common supertype");

        let err = TypeError::MissingWellKnownType {
            name: "Code".to_string(),
        };
        assert_eq!(err.to_string(), "Well-known type 'Code' has not been declared");
    }

    #[test]
    fn test_constexpr_union_message() {
        let err = TypeError::ConstexprUnion {
            union: "(constexpr int31)".to_string(),
            member: "constexpr float64".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Compile-time-only types cannot be unioned: (constexpr int31) | constexpr float64"
        );
    }

    #[test]
    fn test_invariant_classification() {
        assert!(TypeError::DuplicateType { name: "Smi".to_string() }.is_invariant_violation());
        assert!(!TypeError::Config("bad".to_string()).is_invariant_violation());
    }
}
