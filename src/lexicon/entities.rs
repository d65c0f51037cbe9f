// HTML entity decoding.
//
// Post text arrives HTML-escaped (`&amp;`, `&gt;` …). The standard table is the
// full WHATWG named-reference list shipped by `htmlize`, which decodes the way
// browsers do. Legacy names are honoured without a trailing semicolon (`&amp`).
//
// A custom table decodes only `&name;` and numeric references, and leaves
// anything it does not know untouched.

use std::collections::HashMap;

use regex::Regex;

use super::patterns::compile;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct EntityTable {
    custom: Option<CustomTable>,
}

#[derive(Debug, Clone)]
struct CustomTable {
    named: HashMap<String, String>,
    reference: Regex,
}

impl EntityTable {
    pub fn standard() -> Result<Self> {
        Ok(Self { custom: None })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(Self {
            custom: Some(CustomTable {
                named: pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
                reference: compile(
                    "html entity",
                    r"&(?:#([0-9]{1,7})|#[xX]([0-9A-Fa-f]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));",
                )?,
            }),
        })
    }

    pub fn unescape(&self, text: &str) -> String {
        if !text.contains('&') {
            return text.to_string();
        }
        match &self.custom {
            None => htmlize::unescape(text).into_owned(),
            Some(custom) => custom.unescape(text),
        }
    }
}

impl CustomTable {
    fn unescape(&self, text: &str) -> String {
        self.reference
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let whole = &caps[0];
                if let Some(dec) = caps.get(1) {
                    decode_codepoint(dec.as_str(), 10)
                } else if let Some(hex) = caps.get(2) {
                    decode_codepoint(hex.as_str(), 16)
                } else {
                    caps.get(3)
                        .and_then(|name| self.named.get(name.as_str()).cloned())
                        .unwrap_or_else(|| whole.to_string())
                }
            })
            .into_owned()
    }
}

/// Decode a numeric character reference. Invalid or NUL codepoints become
/// U+FFFD, matching how browsers treat them.
fn decode_codepoint(digits: &str, radix: u32) -> String {
    u32::from_str_radix(digits, radix)
        .ok()
        .filter(|&cp| cp != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}
