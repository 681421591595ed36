use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Maximum allowed length for any registry key.
pub const KEY_MAX_LEN: usize = 128;

/// Errors from constructing a registry key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The input was empty.
    #[error("{kind} key cannot be empty")]
    Empty {
        /// Which kind of key was being built.
        kind: &'static str,
    },
    /// The key contains a character outside `A-Z a-z 0-9 _ - .`.
    #[error("{kind} key contains invalid character {found:?} (only A-Z, a-z, 0-9, _, - and . allowed)")]
    InvalidCharacter {
        /// Which kind of key was being built.
        kind: &'static str,
        /// The first offending character.
        found: char,
    },
    /// The key exceeds [`KEY_MAX_LEN`] characters.
    #[error("{kind} key exceeds maximum length of {KEY_MAX_LEN} characters")]
    TooLong {
        /// Which kind of key was being built.
        kind: &'static str,
    },
}

/// Check a raw key against the shared key rules.
///
/// Keys are case sensitive and are never rewritten: `componentKey` stays
/// `componentKey`.
fn check_key(kind: &'static str, raw: &str) -> Result<(), KeyError> {
    if raw.is_empty() {
        return Err(KeyError::Empty { kind });
    }
    if let Some(found) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(KeyError::InvalidCharacter { kind, found });
    }
    if raw.len() > KEY_MAX_LEN {
        return Err(KeyError::TooLong { kind });
    }
    Ok(())
}

macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new key, validating the input.
            pub fn new(raw: impl Into<String>) -> Result<Self, KeyError> {
                let raw = raw.into();
                check_key($kind, &raw)?;
                Ok(Self(raw))
            }

            /// Return the inner string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = KeyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = KeyError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = KeyError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        // Lets maps keyed by this type be queried with a plain `&str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }
    };
}

define_key!(
    /// Identifier of a component, unique within a registry and stable across
    /// versions of that component.
    ///
    /// ```
    /// use relay_core::ComponentKey;
    ///
    /// let key: ComponentKey = "componentKey".parse().unwrap();
    /// assert_eq!(key.as_str(), "componentKey");
    /// ```
    ComponentKey,
    "component"
);

define_key!(
    /// Identifier of an action, unique within its owning component.
    ActionKey,
    "action"
);

define_key!(
    /// Identifier of an input field, unique within one action's input list.
    InputKey,
    "input"
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("componentKey")]
    #[case("http.request")]
    #[case("my-cool_plugin2")]
    #[case("A")]
    fn accepts_valid_keys(#[case] raw: &str) {
        let key = ComponentKey::new(raw).unwrap();
        assert_eq!(key.as_str(), raw);
    }

    #[test]
    fn keeps_case() {
        let key: ActionKey = "actionKey".parse().unwrap();
        assert_eq!(key.to_string(), "actionKey");
        assert_ne!(key, "actionkey");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            InputKey::new(""),
            Err(KeyError::Empty { kind: "input" })
        );
    }

    #[rstest]
    #[case("hello world", ' ')]
    #[case("plugin@1", '@')]
    #[case(" slack", ' ')]
    #[case("a/b", '/')]
    fn rejects_invalid_characters(#[case] raw: &str, #[case] found: char) {
        assert_eq!(
            ComponentKey::new(raw),
            Err(KeyError::InvalidCharacter {
                kind: "component",
                found
            })
        );
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(KEY_MAX_LEN + 1);
        assert_eq!(
            ActionKey::new(long),
            Err(KeyError::TooLong { kind: "action" })
        );
        assert!(ActionKey::new("a".repeat(KEY_MAX_LEN)).is_ok());
    }

    #[test]
    fn error_names_key_kind() {
        let err = ComponentKey::new("").unwrap_err();
        assert_eq!(err.to_string(), "component key cannot be empty");
    }

    #[test]
    fn serde_roundtrip() {
        let key: ComponentKey = "componentKey".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"componentKey\"");

        let back: ComponentKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<InputKey, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(InputKey::new("inputKey").unwrap(), 1);
        assert_eq!(map.get("inputKey"), Some(&1));
    }
}
