//! Best-effort flattening of astrology payloads. Upstream answers in JSON or
//! XML depending on the endpoint; callers only care about a handful of
//! fields.

use crate::compat::{CelestialPosition, ZodiacSign};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

const VALUE_TAGS: &[&str] = &["Value"];
const SIGN_TAGS: &[&str] = &["Sign", "ZodiacSign", "Name", "sign", "zodiac"];
const LONGITUDE_TAGS: &[&str] = &["Longitude", "EclipticLongitude", "Lon", "lon"];
const PERCENT_TAGS: &[&str] = &["Percent", "Total", "Score"];

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    /// Parsed JSON, kept whole.
    Structured(Value),
    /// Known fields lifted out of markup.
    Fields(NormalizedFields),
    /// Well-formed markup without any known field.
    Unrecognized,
    /// Empty, or neither JSON nor usable markup.
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedFields {
    pub sign: Option<String>,
    pub longitude: Option<f64>,
    pub percent: Option<f64>,
    pub value: Option<String>,
}

impl NormalizedFields {
    pub fn is_empty(&self) -> bool {
        self.sign.is_none()
            && self.longitude.is_none()
            && self.percent.is_none()
            && self.value.is_none()
    }

    /// A position needs a longitude. A named sign that is not one of the
    /// twelve stays unknown; a missing sign is derived from the longitude.
    pub fn position(&self) -> Option<CelestialPosition> {
        let longitude = self.longitude?;
        let sign = match self.sign.as_deref() {
            Some(text) => ZodiacSign::parse(text),
            None => Some(ZodiacSign::from_longitude(longitude)),
        };
        Some(CelestialPosition { sign, longitude })
    }
}

impl NormalizedPayload {
    pub fn is_absent(&self) -> bool {
        matches!(self, NormalizedPayload::Absent)
    }

    /// Flattens either shape into the common field set.
    pub fn fields(&self) -> Option<NormalizedFields> {
        let fields = match self {
            NormalizedPayload::Structured(value) => NormalizedFields {
                sign: find_json(value, SIGN_TAGS).and_then(json_text),
                longitude: find_json(value, LONGITUDE_TAGS).and_then(json_number),
                percent: find_json(value, PERCENT_TAGS).and_then(json_number),
                value: find_json(value, VALUE_TAGS).and_then(json_text),
            },
            NormalizedPayload::Fields(fields) => fields.clone(),
            NormalizedPayload::Unrecognized | NormalizedPayload::Absent => return None,
        };
        (!fields.is_empty()).then_some(fields)
    }
}

pub fn normalize(text: &str) -> NormalizedPayload {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return NormalizedPayload::Absent;
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return NormalizedPayload::Structured(value);
        }
    }

    if trimmed.starts_with('<') {
        return normalize_markup(trimmed);
    }

    NormalizedPayload::Absent
}

fn normalize_markup(doc: &str) -> NormalizedPayload {
    if !is_well_formed(doc) {
        return NormalizedPayload::Absent;
    }

    let fields = NormalizedFields {
        sign: first_element_text(doc, SIGN_TAGS),
        longitude: first_element_text(doc, LONGITUDE_TAGS).and_then(|text| text.parse().ok()),
        percent: first_element_text(doc, PERCENT_TAGS).and_then(|text| text.parse().ok()),
        value: first_element_text(doc, VALUE_TAGS),
    };

    if fields.is_empty() {
        NormalizedPayload::Unrecognized
    } else {
        NormalizedPayload::Fields(fields)
    }
}

static PROLOG: OnceLock<Option<Regex>> = OnceLock::new();
static ROOT: OnceLock<Option<Regex>> = OnceLock::new();
static MARKUP: OnceLock<Option<Regex>> = OnceLock::new();
static ELEMENTS: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// One pattern per known tag, compiled on first use.
fn element_patterns() -> &'static HashMap<&'static str, Regex> {
    ELEMENTS.get_or_init(|| {
        [VALUE_TAGS, SIGN_TAGS, LONGITUDE_TAGS, PERCENT_TAGS]
            .concat()
            .into_iter()
            .filter_map(|tag| {
                let escaped = regex::escape(tag);
                let pattern = format!(r"<{escaped}(?:\s[^>]*)?>([\s\S]*?)</{escaped}\s*>");
                Regex::new(&pattern).ok().map(|re| (tag, re))
            })
            .collect()
    })
}

/// Root element must be self-closing or closed at the end of the document.
fn is_well_formed(doc: &str) -> bool {
    let Some(prolog) = compiled(
        &PROLOG,
        r"^(?:<\?[^>]*\?>\s*|<!--[\s\S]*?-->\s*|<!DOCTYPE[^>]*>\s*)*",
    ) else {
        return false;
    };
    let body = doc[prolog.find(doc).map_or(0, |m| m.end())..].trim_end();

    let Some(root) = compiled(&ROOT, r"^<([A-Za-z_][\w:.\-]*)(?:\s[^>]*?)?(/?)>") else {
        return false;
    };
    let Some(captures) = root.captures(body) else {
        return false;
    };

    if &captures[2] == "/" {
        return body.len() == captures[0].len();
    }

    body.strip_suffix('>')
        .map(str::trim_end)
        .and_then(|rest| rest.strip_suffix(&captures[1]))
        .is_some_and(|rest| rest.ends_with("</"))
}

/// Text of the first element among `tags` that has non-blank content.
fn first_element_text(doc: &str, tags: &[&str]) -> Option<String> {
    tags.iter().find_map(|tag| element_text(doc, tag))
}

fn element_text(doc: &str, tag: &str) -> Option<String> {
    let re = element_patterns().get(tag)?;
    let inner = re.captures(doc)?.get(1)?.as_str();

    let strip = compiled(&MARKUP, r"<[^>]*>")?;
    let text = decode_entities(strip.replace_all(inner, "").trim());
    (!text.is_empty()).then_some(text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Depth-first search. Within one object `keys` are tried in priority order
/// before descending into children.
fn find_json<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    match value {
        Value::Object(map) => keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|child| json_scalar(child))
            .or_else(|| map.values().find_map(|child| find_json(child, keys))),
        Value::Array(items) => items.iter().find_map(|child| find_json(child, keys)),
        _ => None,
    }
}

fn json_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_))
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
