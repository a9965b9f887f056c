//! Payload representation for encryption input and decryption output
//!
//! Encryption accepts structured JSON values, text, or raw bytes; the
//! variant is recovered on decryption by an explicit, ordered interpretation
//! of the plaintext (JSON first, then UTF-8 text, then raw bytes). The
//! sequence is deterministic and total: each stage that fails falls through
//! to the next, and the last stage always succeeds.

use serde_json::Value;

use crate::error::{VaultError, VaultResult};

/// A value passing through the encryption boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON-serializable structured value (object, array, number, ...)
    Structured(Value),
    /// A UTF-8 string
    Text(String),
    /// An opaque byte sequence
    Bytes(Vec<u8>),
}

impl Payload {
    /// Serialize the payload to the plaintext bytes that get encrypted
    ///
    /// Structured values become canonical UTF-8 JSON, text becomes UTF-8
    /// bytes, and byte sequences pass through unchanged.
    pub fn to_plaintext(&self) -> VaultResult<Vec<u8>> {
        match self {
            Payload::Structured(value) => serde_json::to_vec(value)
                .map_err(|e| VaultError::Encryption(format!("Failed to serialize data: {}", e))),
            Payload::Text(text) => Ok(text.as_bytes().to_vec()),
            Payload::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Interpret decrypted plaintext bytes, recovering the richest variant
    /// that applies
    pub fn from_plaintext(plaintext: Vec<u8>) -> Payload {
        if let Ok(value) = serde_json::from_slice::<Value>(&plaintext) {
            return Payload::Structured(value);
        }
        match String::from_utf8(plaintext) {
            Ok(text) => Payload::Text(text),
            Err(err) => Payload::Bytes(err.into_bytes()),
        }
    }

    /// View the structured value, if this payload holds one
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Payload::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// View the text, if this payload holds a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Structured(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_to_plaintext_is_json() {
        let payload = Payload::Structured(json!({"a": 1}));
        let plaintext = payload.to_plaintext().unwrap();
        assert_eq!(plaintext, br#"{"a":1}"#);
    }

    #[test]
    fn test_from_plaintext_json_object() {
        let payload = Payload::from_plaintext(br#"{"a":1}"#.to_vec());
        assert_eq!(payload, Payload::Structured(json!({"a": 1})));
    }

    #[test]
    fn test_from_plaintext_plain_text() {
        // "hello" is not valid JSON, so it falls through to text
        let payload = Payload::from_plaintext(b"hello".to_vec());
        assert_eq!(payload, Payload::Text("hello".into()));
    }

    #[test]
    fn test_from_plaintext_non_utf8_bytes() {
        let raw = vec![0xff, 0xfe, 0x00, 0x01];
        let payload = Payload::from_plaintext(raw.clone());
        assert_eq!(payload, Payload::Bytes(raw));
    }

    #[test]
    fn test_from_plaintext_is_deterministic() {
        let a = Payload::from_plaintext(b"[1,2,3]".to_vec());
        let b = Payload::from_plaintext(b"[1,2,3]".to_vec());
        assert_eq!(a, b);
        assert_eq!(a, Payload::Structured(json!([1, 2, 3])));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Payload::from("hi"), Payload::Text("hi".into()));
        assert_eq!(
            Payload::from(vec![1u8, 2]),
            Payload::Bytes(vec![1, 2])
        );
        assert_eq!(
            Payload::from(json!(null)),
            Payload::Structured(Value::Null)
        );
    }
}
