//! Reference codec for identifiers handed back to the host
//!
//! The provider keeps no session between calls. Everything a later stage
//! needs (which title, which audio variant, which episode) travels inside
//! the `id` string of the records a stage emits. This module owns that wire
//! format.
//!
//! # Wire format
//!
//! References are compact JSON objects:
//!
//! - anime: `{"slug":"one-piece","type":"dub"}`
//! - episode: `{"number":12,"slug":"one-piece","type":"dub"}`
//!
//! # Tolerance
//!
//! [`AnimeRef::decode`] never fails. A plain slug, a legacy identifier, or
//! anything that is not a reference object decodes to
//! `{slug: <input>, variant: sub}`. An unknown `type` decodes to `sub`.
//! [`EpisodeRef::decode`] is strict about `slug` and `number` because the
//! server lookup cannot proceed without both.

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Audio track selection threaded through the whole pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Subtitled
    #[default]
    Sub,
    /// Dubbed
    Dub,
}

impl Variant {
    /// Variant from the host's `dub` flag
    pub fn from_dub(dub: bool) -> Self {
        if dub {
            Variant::Dub
        } else {
            Variant::Sub
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Sub => "sub",
            Variant::Dub => "dub",
        }
    }

    /// Uppercase key used by the embeds map (`SUB` / `DUB`)
    pub fn category(&self) -> &'static str {
        match self {
            Variant::Sub => "SUB",
            Variant::Dub => "DUB",
        }
    }

    /// Lenient parse: anything other than `dub` (any case) is `sub`
    fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sub" => Ok(Variant::Sub),
            "dub" => Ok(Variant::Dub),
            other => Err(ProviderError::InvalidReference(format!(
                "unknown variant '{}'",
                other
            ))),
        }
    }
}

/// Reference to a title: enough state to list its episodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeRef {
    pub slug: String,
    pub variant: Variant,
}

/// Reference to one episode: enough state to resolve its stream
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRef {
    pub slug: String,
    pub number: f64,
    pub variant: Variant,
}

/// Loose shape accepted on decode; fields are validated afterwards
#[derive(Debug, Default, Deserialize)]
struct RawRef {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    number: Option<Value>,
    #[serde(default, rename = "type")]
    variant: Option<String>,
}

impl RawRef {
    fn parse(input: &str) -> Option<Self> {
        serde_json::from_str(input).ok()
    }

    fn variant(&self) -> Variant {
        self.variant
            .as_deref()
            .map(Variant::parse_lenient)
            .unwrap_or_default()
    }
}

impl AnimeRef {
    pub fn new(slug: impl Into<String>, variant: Variant) -> Self {
        Self {
            slug: slug.into(),
            variant,
        }
    }

    /// Encode into the opaque identifier string
    pub fn encode(&self) -> String {
        json!({ "slug": self.slug, "type": self.variant.as_str() }).to_string()
    }

    /// Decode an identifier, degrading to `{slug: input, variant: sub}`
    pub fn decode(input: &str) -> Self {
        match RawRef::parse(input) {
            Some(raw) => match raw.slug.as_deref() {
                Some(slug) if !slug.is_empty() => Self::new(slug, raw.variant()),
                _ => Self::new(input, Variant::Sub),
            },
            None => Self::new(input, Variant::Sub),
        }
    }
}

impl EpisodeRef {
    pub fn new(slug: impl Into<String>, number: f64, variant: Variant) -> Self {
        Self {
            slug: slug.into(),
            number,
            variant,
        }
    }

    /// Encode into the opaque identifier string
    pub fn encode(&self) -> String {
        json!({
            "slug": self.slug,
            "number": number_value(self.number),
            "type": self.variant.as_str(),
        })
        .to_string()
    }

    /// Decode an identifier; fails with `InvalidReference` when slug or
    /// number is missing
    pub fn decode(input: &str) -> Result<Self> {
        let invalid = || ProviderError::InvalidReference(input.to_string());
        let raw = RawRef::parse(input).ok_or_else(invalid)?;
        let slug = raw
            .slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(invalid)?;
        let number = raw.number.as_ref().and_then(parse_number).ok_or_else(invalid)?;
        Ok(Self::new(slug, number, raw.variant()))
    }
}

/// Integral numbers are written without a fractional part
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

/// Episode numbers arrive as JSON numbers, or as numeric strings from older hosts
fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Convenience wrapper over [`AnimeRef::encode`]
pub fn encode_anime_ref(reference: &AnimeRef) -> String {
    reference.encode()
}

/// Convenience wrapper over [`AnimeRef::decode`]
pub fn decode_anime_ref(input: &str) -> AnimeRef {
    AnimeRef::decode(input)
}

/// Convenience wrapper over [`EpisodeRef::encode`]
pub fn encode_episode_ref(reference: &EpisodeRef) -> String {
    reference.encode()
}

/// Convenience wrapper over [`EpisodeRef::decode`]
pub fn decode_episode_ref(input: &str) -> Result<EpisodeRef> {
    EpisodeRef::decode(input)
}
