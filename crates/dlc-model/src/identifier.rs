//! Composite container identifiers.
//!
//! A container id cell such as `"MS 0042 A"` is split on whitespace into up to
//! four ordered slots. Missing trailing slots stay empty, so the key always has
//! exactly four positions:
//!
//! ```text
//! "MS 0042 A"  →  ["MS", "0042", "A", null]
//! ```
//!
//! The canonical text form of that array is what container stores are queried with.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Number of identifier slots on a container.
pub const IDENTIFIER_SLOTS: usize = 4;

/// A 4-slot composite identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "IdentifierFields", into = "IdentifierFields")]
pub struct IdentifierKey {
    slots: [Option<String>; IDENTIFIER_SLOTS],
}

impl IdentifierKey {
    /// Split a raw container-id cell into its slots.
    ///
    /// Fails when the cell holds no tokens or more than [`IDENTIFIER_SLOTS`] tokens;
    /// neither can be mapped onto a container identifier.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ModelError::InvalidIdentifier {
                raw: raw.to_string(),
                reason: "no identifier tokens".to_string(),
            });
        }
        if tokens.len() > IDENTIFIER_SLOTS {
            return Err(ModelError::InvalidIdentifier {
                raw: raw.to_string(),
                reason: format!(
                    "{} tokens, at most {} are allowed",
                    tokens.len(),
                    IDENTIFIER_SLOTS
                ),
            });
        }

        let mut slots: [Option<String>; IDENTIFIER_SLOTS] = Default::default();
        for (slot, token) in slots.iter_mut().zip(tokens) {
            *slot = Some(token.to_string());
        }
        Ok(Self { slots })
    }

    /// Parse the canonical JSON-array form (`["MS","0042",null,null]`).
    pub fn from_canonical(text: &str) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::InvalidIdentifier {
            raw: text.to_string(),
            reason,
        };

        let value: Value =
            serde_json::from_str(text).map_err(|e| invalid(format!("not JSON: {e}")))?;
        let items = value
            .as_array()
            .ok_or_else(|| invalid("expected a JSON array".to_string()))?;
        if items.len() != IDENTIFIER_SLOTS {
            return Err(invalid(format!(
                "expected {} slots, found {}",
                IDENTIFIER_SLOTS,
                items.len()
            )));
        }

        let mut slots: [Option<String>; IDENTIFIER_SLOTS] = Default::default();
        for (slot, item) in slots.iter_mut().zip(items) {
            *slot = match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => return Err(invalid(format!("unexpected slot value {other}"))),
            };
        }
        Ok(Self { slots })
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    /// The lookup key: a JSON array of all four slots, `null` for empty ones.
    pub fn canonical(&self) -> String {
        Value::Array(
            self.slots
                .iter()
                .map(|s| s.clone().map(Value::String).unwrap_or(Value::Null))
                .collect(),
        )
        .to_string()
    }
}

impl fmt::Display for IdentifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Record-side representation: `id_0` .. `id_3`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IdentifierFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_0: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_3: Option<String>,
}

impl From<IdentifierFields> for IdentifierKey {
    fn from(f: IdentifierFields) -> Self {
        Self {
            slots: [f.id_0, f.id_1, f.id_2, f.id_3],
        }
    }
}

impl From<IdentifierKey> for IdentifierFields {
    fn from(key: IdentifierKey) -> Self {
        let [id_0, id_1, id_2, id_3] = key.slots;
        Self {
            id_0,
            id_1,
            id_2,
            id_3,
        }
    }
}
