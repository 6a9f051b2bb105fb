//! # Identifier Newtypes
//!
//! Validated string identifiers for catalogs, policy engines and policy
//! rules. Each is trimmed and must be non-empty; deserialization enforces
//! the same rule so an empty id can never enter through the wire.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a ", $kind, ", validating non-emptiness.")]
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyIdentifier`] if the string is
            /// empty or whitespace-only.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a compliance catalog, e.g. `"nist-800-53-r5"`.
    CatalogId,
    "catalog id"
);

string_id!(
    /// Name of the policy engine that produced an evaluation, e.g. `"opa"`.
    ///
    /// Selects the resolver implementation for a policy reference.
    EngineName,
    "engine name"
);

string_id!(
    /// Identifier of a single policy rule within an engine.
    ///
    /// This is the cache key and the join key against assessment plan
    /// procedure ids.
    RuleId,
    "rule id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_id_trims_whitespace() {
        let id = RuleId::new("  AC-1 ").unwrap();
        assert_eq!(id.as_str(), "AC-1");
    }

    #[test]
    fn identifiers_reject_empty() {
        assert_eq!(
            RuleId::new("   ").unwrap_err(),
            ValidationError::EmptyIdentifier { kind: "rule id" }
        );
        assert!(CatalogId::new("").is_err());
        assert!(EngineName::new("\t").is_err());
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        let result: Result<CatalogId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EngineName::new("opa").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"opa\"");
    }

    #[test]
    fn catalog_ids_order_lexically() {
        let mut ids = vec![
            CatalogId::new("cat-b").unwrap(),
            CatalogId::new("cat-a").unwrap(),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "cat-a");
    }
}
