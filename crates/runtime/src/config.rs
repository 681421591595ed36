//! Invoker configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Environment variable holding the default timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "RELAY_INVOKE_TIMEOUT_MS";

/// Settings shared by every invocation of an [`Invoker`](crate::Invoker).
///
/// Serialized as `{"timeout_ms": 5000}`. A timeout of `0` or a missing field
/// means calls are not bounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Upper bound for a single handler run.
    #[serde(rename = "timeout_ms", default, with = "timeout_ms")]
    pub default_timeout: Option<Duration>,
}

impl InvokerConfig {
    /// Config with a default timeout.
    pub fn with_default_timeout(timeout: Duration) -> Self {
        Self {
            default_timeout: Some(timeout).filter(|t| !t.is_zero()),
        }
    }

    /// Read settings from the environment.
    ///
    /// `RELAY_INVOKE_TIMEOUT_MS` sets the default timeout. Unparseable
    /// values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match parse_timeout_ms(&raw) {
                Some(timeout) => config.default_timeout = timeout,
                None => tracing::warn!(
                    variable = TIMEOUT_ENV,
                    value = %raw,
                    "ignoring invalid timeout"
                ),
            }
        }
        config
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `None` when `raw` is not a number; `Some(None)` for zero.
fn parse_timeout_ms(raw: &str) -> Option<Option<Duration>> {
    let ms: u64 = raw.trim().parse().ok()?;
    Some((ms > 0).then(|| Duration::from_millis(ms)))
}

mod timeout_ms {
    use super::{Deserialize, Deserializer, Duration, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let ms = value.map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        serializer.serialize_u64(ms)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let ms = Option::<u64>::deserialize(deserializer)?;
        Ok(ms.filter(|ms| *ms > 0).map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn default_has_no_timeout() {
        assert_eq!(InvokerConfig::default().default_timeout, None);
    }

    #[rstest]
    #[case(r#"{"timeout_ms": 1500}"#, Some(Duration::from_millis(1500)))]
    #[case(r#"{"timeout_ms": 0}"#, None)]
    #[case(r#"{"timeout_ms": null}"#, None)]
    #[case("{}", None)]
    fn from_json(#[case] json: &str, #[case] expected: Option<Duration>) {
        let config = InvokerConfig::from_json(json).unwrap();
        assert_eq!(config.default_timeout, expected);
    }

    #[test]
    fn from_json_rejects_negative() {
        assert!(InvokerConfig::from_json(r#"{"timeout_ms": -1}"#).is_err());
    }

    #[test]
    fn serializes_as_millis() {
        let config = InvokerConfig::with_default_timeout(Duration::from_secs(2));
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({"timeout_ms": 2000})
        );
        assert_eq!(
            serde_json::to_value(InvokerConfig::default()).unwrap(),
            serde_json::json!({"timeout_ms": 0})
        );
    }

    #[test]
    fn zero_duration_means_unbounded() {
        assert_eq!(
            InvokerConfig::with_default_timeout(Duration::ZERO).default_timeout,
            None
        );
    }

    #[rstest]
    #[case("250", Some(Some(Duration::from_millis(250))))]
    #[case(" 30000 ", Some(Some(Duration::from_secs(30))))]
    #[case("0", Some(None))]
    #[case("soon", None)]
    #[case("-5", None)]
    fn parses_env_value(#[case] raw: &str, #[case] expected: Option<Option<Duration>>) {
        assert_eq!(parse_timeout_ms(raw), expected);
    }
}
