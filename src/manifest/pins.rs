//! Version pins: `-v:key=value` overrides for placeholder pack versions

use indexmap::IndexMap;

/// One `key=value` pin as given on the command line, with the key normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPin {
    pub key: String,
    pub value: String,
}

impl VersionPin {
    /// Parse `key=value`. The key is wrapped as `${key}` unless it already starts with `${`
    /// or with a digit (a literal version being replaced).
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;

        if key.is_empty() {
            return Err(format!("missing key in '{raw}'"));
        }

        Ok(Self {
            key: placeholder_key(key),
            value: value.to_string(),
        })
    }
}

/// Wrap a bare key into the `${key}` placeholder token used in manifests
pub fn placeholder_key(key: &str) -> String {
    if key.starts_with("${") || key.starts_with(|c: char| c.is_ascii_digit()) {
        key.to_string()
    } else {
        format!("${{{key}}}")
    }
}

/// Placeholder token -> replacement version. Later pins for the same key win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPins(IndexMap<String, String>);

impl VersionPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pin: VersionPin) {
        self.0.insert(pin.key, pin.value);
    }

    /// Replacement for a pack version, matched exactly
    pub fn get(&self, version: &str) -> Option<&str> {
        self.0.get(version).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<VersionPin> for VersionPins {
    fn from_iter<I: IntoIterator<Item = VersionPin>>(iter: I) -> Self {
        let mut pins = Self::new();
        for pin in iter {
            pins.insert(pin);
        }
        pins
    }
}
