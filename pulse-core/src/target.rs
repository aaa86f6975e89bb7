//! Target normalization and input collection.

use serde::{Deserialize, Serialize};

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Scheme prepended to targets that don't carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => HTTP_PREFIX,
            Scheme::Https => HTTPS_PREFIX,
        }
    }
}

impl std::str::FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(format!("Unknown scheme: {}", s)),
        }
    }
}

/// A raw target and its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub index: usize,
    pub raw: String,
}

impl Target {
    pub fn new(index: usize, raw: impl Into<String>) -> Self {
        Self {
            index,
            raw: raw.into(),
        }
    }
}

/// Turn a raw host or URL into a request URL, defaulting to HTTPS.
///
/// Values already starting with `http://` or `https://` are returned as-is.
/// The prefix check is case-sensitive and the host is not validated; a
/// malformed host simply fails when it is requested.
pub fn normalize(raw: &str) -> String {
    normalize_with_scheme(raw, Scheme::Https)
}

/// Same as [`normalize`] with an explicit default scheme.
pub fn normalize_with_scheme(raw: &str, default_scheme: Scheme) -> String {
    let raw = raw.trim();
    if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("{}{}", default_scheme.prefix(), raw)
    }
}

fn has_scheme(raw: &str) -> bool {
    raw.starts_with(HTTP_PREFIX) || raw.starts_with(HTTPS_PREFIX)
}

/// Collect targets from line-oriented input.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. Order and
/// duplicates are preserved.
pub fn parse_targets(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Pair raw targets with their input positions.
pub fn index_targets<I, S>(raw: I) -> Vec<Target>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter()
        .enumerate()
        .map(|(index, raw)| Target::new(index, raw))
        .collect()
}
