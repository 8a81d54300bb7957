//! Query-string model for a single page visit.
//!
//! Parsing follows `URLSearchParams`: pairs are form-urlencoded, later
//! occurrences of a key override earlier ones, and flag parameters such as
//! `alt` count as present even with an empty value.

use std::collections::BTreeMap;

use url::Url;

use crate::QueryDefaults;

pub const ART: &str = "art";
pub const STRENGTH: &str = "str";
pub const SCALE_FACTOR: &str = "fscale";
pub const DEPTH_FACTOR: &str = "fdepth";
pub const ALT: &str = "alt";
pub const LOG: &str = "log";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    /// Parses a raw query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut values = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            values.insert(key.into_owned(), value.into_owned());
        }
        Self { values }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::parse(url.query().unwrap_or_default())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Typed view parameters after applying defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    pub art: String,
    pub strength: f64,
    pub scale_factor: f32,
    pub depth_factor: f32,
    pub alt: bool,
    pub log: String,
}

impl ViewParams {
    pub fn from_query(query: &str, defaults: &QueryDefaults) -> Self {
        Self::resolve(&QueryParams::parse(query), defaults)
    }

    pub fn resolve(params: &QueryParams, defaults: &QueryDefaults) -> Self {
        Self {
            art: params
                .get(ART)
                .map(str::to_string)
                .unwrap_or_else(|| defaults.art.clone()),
            strength: numeric_param(params, STRENGTH, defaults.strength),
            scale_factor: numeric_param(params, SCALE_FACTOR, f64::from(defaults.fscale)) as f32,
            depth_factor: numeric_param(params, DEPTH_FACTOR, f64::from(defaults.fdepth)) as f32,
            alt: params.contains(ALT),
            log: params
                .get(LOG)
                .map(str::to_string)
                .unwrap_or_else(|| defaults.log.clone()),
        }
    }
}

fn numeric_param(params: &QueryParams, key: &str, fallback: f64) -> f64 {
    let Some(raw) = params.get(key) else {
        return fallback;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::warn!(
                param = key,
                value = raw,
                fallback,
                "ignoring non-numeric query parameter"
            );
            fallback
        }
    }
}

/// Returns `url` with `key` set to `value`, or removed when `value` is `None`.
///
/// Mirrors `URLSearchParams.set`: the first existing pair is updated in place,
/// later duplicates are dropped, and a missing key is appended. Removing the
/// last pair clears the query entirely.
pub fn with_param(url: &Url, key: &str, value: Option<&str>) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (existing_key, existing_value) in url.query_pairs() {
        if existing_key != key {
            pairs.push((existing_key.into_owned(), existing_value.into_owned()));
            continue;
        }
        if let (Some(value), false) = (value, replaced) {
            pairs.push((key.to_string(), value.to_string()));
            replaced = true;
        }
    }
    if let (Some(value), false) = (value, replaced) {
        pairs.push((key.to_string(), value.to_string()));
    }

    let mut updated = url.clone();
    if pairs.is_empty() {
        updated.set_query(None);
    } else {
        updated.query_pairs_mut().clear().extend_pairs(pairs);
    }
    updated
}
