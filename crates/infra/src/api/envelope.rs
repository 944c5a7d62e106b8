//! Response envelope extraction
//!
//! List endpoints do not agree on how they wrap their records. Some return a
//! bare array, others an object with the array under a domain key
//! (`agents`, `projects`) or a generic one. The extractor tries a fixed list
//! of shapes in priority order and the first one that matches wins.

use capacal_domain::constants::GENERIC_ENVELOPE_KEYS;
use serde_json::Value;

/// One way a list of records can be wrapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// The payload is the array itself
    BareArray,
    /// The payload is an object holding the array under this key
    Wrapped(String),
}

impl EnvelopeShape {
    pub fn matches(&self, payload: &Value) -> bool {
        match self {
            Self::BareArray => payload.is_array(),
            Self::Wrapped(key) => payload.get(key).is_some_and(Value::is_array),
        }
    }

    /// Take the records out of `payload` when this shape matches. A payload
    /// that does not match is left as it was.
    pub fn extract(&self, payload: &mut Value) -> Option<Vec<Value>> {
        if !self.matches(payload) {
            return None;
        }
        let target = match self {
            Self::BareArray => payload,
            Self::Wrapped(key) => payload.get_mut(key)?,
        };
        match target.take() {
            Value::Array(records) => Some(records),
            _ => None,
        }
    }
}

/// Ordered list of envelope shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeExtractor {
    shapes: Vec<EnvelopeShape>,
}

impl EnvelopeExtractor {
    pub fn new(shapes: Vec<EnvelopeShape>) -> Self {
        Self { shapes }
    }

    /// Bare array, then `list_key`, then the generic keys. A list key that
    /// repeats a generic key is tried once.
    pub fn for_list_key(list_key: &str) -> Self {
        let mut shapes = vec![EnvelopeShape::BareArray];
        let keys = std::iter::once(list_key).chain(GENERIC_ENVELOPE_KEYS);
        for key in keys.filter(|key| !key.is_empty()) {
            let shape = EnvelopeShape::Wrapped(key.to_string());
            if !shapes.contains(&shape) {
                shapes.push(shape);
            }
        }
        Self { shapes }
    }

    pub fn shapes(&self) -> &[EnvelopeShape] {
        &self.shapes
    }

    /// Records of the first matching shape; empty when nothing matches.
    pub fn extract(&self, mut payload: Value) -> Vec<Value> {
        self.shapes.iter().find_map(|shape| shape.extract(&mut payload)).unwrap_or_default()
    }
}

impl Default for EnvelopeExtractor {
    fn default() -> Self {
        Self::for_list_key("")
    }
}
