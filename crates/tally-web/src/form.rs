//! `application/x-www-form-urlencoded` bodies.

use std::collections::HashMap;

use urlencoding::decode_binary;

/// Decoded form fields. Later duplicates of a name win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { fields }
    }

    /// Field value, or the empty string when the field was not submitted.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }
}

/// `+` is a space in form encoding; invalid UTF-8 is replaced, not rejected.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&decode_binary(spaced.as_bytes())).into_owned()
}
