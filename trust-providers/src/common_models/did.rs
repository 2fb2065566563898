use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::common_models::macros::{impl_display, impl_into};

/// A syntactically valid DID. Every constructor, deserialization included,
/// goes through [`DidValue::is_did`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DidValue(String);
impl_display!(DidValue);
impl_into!(DidValue; String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not a DID: `{0}`")]
pub struct InvalidDidError(pub String);

impl DidValue {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Checks the `did:<method>:<method-specific-id>` syntax.
    ///
    /// The method name is lower-case alphanumeric. The method-specific id is a
    /// colon separated list of segments made of `ALPHA / DIGIT / "." / "-" / "_"`
    /// and percent-encoded octets; only the last segment must be non-empty.
    pub fn is_did(value: &str) -> bool {
        let Some(rest) = value.strip_prefix("did:") else {
            return false;
        };

        let Some((method, method_specific_id)) = rest.split_once(':') else {
            return false;
        };

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return false;
        }

        let segments: Vec<&str> = method_specific_id.split(':').collect();
        if segments.last().map_or(true, |last| last.is_empty()) {
            return false;
        }

        segments.iter().all(|segment| is_id_segment(segment))
    }

    /// Returns the DID method name, e.g. `web` for `did:web:example.com`.
    pub fn method(&self) -> Option<&str> {
        self.0
            .strip_prefix("did:")
            .and_then(|rest| rest.split_once(':'))
            .map(|(method, _)| method)
    }
}

fn is_id_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'%' => {
                let encoded = bytes.get(index + 1..index + 3);
                if !encoded.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                index += 3;
            }
            c if c.is_ascii_alphanumeric() || matches!(c, b'.' | b'-' | b'_') => index += 1,
            _ => return false,
        }
    }

    true
}

impl FromStr for DidValue {
    type Err = InvalidDidError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if DidValue::is_did(value) {
            Ok(DidValue(value.to_owned()))
        } else {
            Err(InvalidDidError(value.to_owned()))
        }
    }
}

impl TryFrom<String> for DidValue {
    type Error = InvalidDidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if DidValue::is_did(&value) {
            Ok(DidValue(value))
        } else {
            Err(InvalidDidError(value))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum KeyRole {
    Authentication,
    AssertionMethod,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_dids() {
        for did in [
            "did:web:host:A",
            "did:web:localhost%3A8080:BPNL000000000000",
            "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK",
            "did:example::123",
        ] {
            assert!(DidValue::is_did(did), "{did}");
        }
    }

    #[test]
    fn test_invalid_dids() {
        for did in [
            "",
            "did",
            "did:",
            "did:web",
            "did:web:",
            "did:example:123:",
            "did:Web:host",
            "DID:web:host",
            "https://host/path",
            "did:web:host/path",
            "did:web:host%3",
            "did:web:host%zz",
        ] {
            assert!(!DidValue::is_did(did), "{did}");
        }
    }

    #[test]
    fn test_from_str_and_method() {
        let did: DidValue = "did:web:host:B".parse().unwrap();

        assert_eq!(did.method(), Some("web"));
        assert_eq!(did.to_string(), "did:web:host:B");
        assert!("not-a-did".parse::<DidValue>().is_err());
    }

    #[test]
    fn test_try_from_checks_syntax() {
        assert_eq!(
            DidValue::try_from("did:web:host:A".to_owned()).unwrap().as_str(),
            "did:web:host:A"
        );
        assert_eq!(
            DidValue::try_from("https://host/A".to_owned()),
            Err(InvalidDidError("https://host/A".to_owned()))
        );
    }

    #[test]
    fn test_deserialize_checks_syntax() {
        let did: DidValue = serde_json::from_str(r#""did:web:host:A""#).unwrap();
        assert_eq!(did.as_str(), "did:web:host:A");
        assert_eq!(serde_json::to_string(&did).unwrap(), r#""did:web:host:A""#);

        assert!(serde_json::from_str::<DidValue>(r#""did:web:""#).is_err());
        assert!(serde_json::from_str::<DidValue>(r#""BPNL000000000001""#).is_err());
    }
}
