use thiserror::Error;

/// Result type for the `flatmap` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Errors raised while registering, compiling, or executing mappings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A destination member has no convention path and no aggregate fallback
    #[error(
        "We could not find the Method {residual}() which matched the property {member} of type {type_name}."
    )]
    UnresolvedMember {
        /// Unmatched identifier segment, read as a method name
        residual:  String,
        /// Destination member being resolved
        member:    String,
        /// Type at which resolution stalled
        type_name: String,
    },

    /// An override or ignore names a member the destination does not declare
    #[error("Type {type_name} has no member named '{member}'")]
    UnknownMember {
        /// Member named by the registration
        member:    String,
        /// Destination type that lacks it
        type_name: String,
    },

    /// Source or destination of a registration has no members to map
    #[error("Type {type_name} is not a complex type and cannot take part in a mapping")]
    NotComplex {
        /// The scalar, opaque or collection type
        type_name: String,
    },

    /// Mapping requested for a type pair that was never compiled
    #[error("No compiled mapping from {source_type} to {destination_type}; register it and call compile()")]
    NotCompiled {
        /// Requested source type
        source_type:      String,
        /// Requested destination type
        destination_type: String,
    },

    /// A source, destination or override result could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The filled-in destination could not be rebuilt
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// A configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an unresolved-member error
    pub fn unresolved(
        residual: impl Into<String>,
        member: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnresolvedMember {
            residual:  residual.into(),
            member:    member.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an error for a failed source or destination serialization
    pub fn serialization_failed(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Serialization(format!("{what}: {details}"))
    }

    /// Create an error for a failed destination rebuild
    pub fn deserialization_failed(what: &str, details: impl std::fmt::Display) -> Self {
        Self::Deserialization(format!("{what}: {details}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message_shape() {
        let error = Error::unresolved("Count", "SonsCount", "System.String");
        assert_eq!(
            error.to_string(),
            "We could not find the Method Count() which matched the property SonsCount of type System.String."
        );
    }

    #[test]
    fn test_not_compiled_names_both_types() {
        let error = Error::NotCompiled {
            source_type:      "a::Father".to_string(),
            destination_type: "a::FatherDto".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("a::Father to a::FatherDto"));
    }
}
