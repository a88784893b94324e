//! Release index data model.
//!
//! The upstream `index.json` is a two-level document: version identifier to
//! release entry, and inside each entry a handful of metadata keys next to one
//! object per platform. It is decoded once into [`ReleaseIndex`] and never
//! mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::version;

/// Metadata keys that live next to the platform artifacts in a release entry.
pub const RESERVED_KEYS: [&str; 5] = ["version", "date", "docs", "stdDocs", "src"];

/// Errors produced while decoding or querying the release index.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// The document is not JSON, or not shaped as version -> entry -> artifact.
    #[error("malformed release index")]
    Parse(#[from] serde_json::Error),

    /// The requested version is not a key of the index.
    #[error("unknown version '{0}'")]
    UnknownVersion(String),

    /// The requested platform is not listed for the version, or has no download URL.
    #[error("unknown platform '{platform}' for version '{version}'")]
    UnknownPlatform {
        /// Version that was resolved.
        version: String,
        /// Platform that was requested.
        platform: String,
    },
}

/// Download metadata for one (version, platform) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformArtifact {
    /// Archive download URL. Its suffix decides the archive format.
    #[serde(default)]
    pub tarball: Option<String>,

    /// SHA-256 of the archive, hex encoded.
    #[serde(default)]
    pub shasum: Option<String>,

    /// Archive size in bytes.
    #[serde(default, deserialize_with = "size_from_text_or_number")]
    pub size: Option<u64>,
}

impl PlatformArtifact {
    /// The download URL, if the artifact carries a non-empty one.
    pub fn url(&self) -> Option<&str> {
        self.tarball.as_deref().filter(|url| !url.is_empty())
    }
}

/// The index publishes sizes as decimal strings; accept plain numbers as well.
fn size_from_text_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    match Option::<Size>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Size::Number(n)) => Ok(Some(n)),
        Some(Size::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One version's worth of the index: release metadata plus per-platform artifacts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RawReleaseEntry")]
pub struct ReleaseEntry {
    /// Human readable version string (only present on the `master` entry).
    pub version: Option<String>,
    /// Release date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Language reference URL.
    pub docs: Option<String>,
    /// Standard library documentation URL.
    pub std_docs: Option<String>,
    /// Source tarball. Metadata, never offered as a platform.
    pub src: Option<PlatformArtifact>,
    /// Other plain-string metadata such as release notes links.
    pub extra: BTreeMap<String, String>,
    platforms: BTreeMap<String, PlatformArtifact>,
}

/// Wire form of [`ReleaseEntry`] before the remaining keys are validated.
#[derive(Deserialize)]
struct RawReleaseEntry {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    docs: Option<String>,
    #[serde(default, rename = "stdDocs")]
    std_docs: Option<String>,
    #[serde(default)]
    src: Option<PlatformArtifact>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<RawReleaseEntry> for ReleaseEntry {
    type Error = String;

    fn try_from(raw: RawReleaseEntry) -> Result<Self, Self::Error> {
        let mut platforms = BTreeMap::new();
        let mut extra = BTreeMap::new();

        for (key, value) in raw.rest {
            match value {
                serde_json::Value::Object(_) => {
                    let artifact: PlatformArtifact = serde_json::from_value(value)
                        .map_err(|e| format!("platform '{key}': {e}"))?;
                    platforms.insert(key, artifact);
                }
                serde_json::Value::String(s) => {
                    extra.insert(key, s);
                }
                other => {
                    return Err(format!(
                        "key '{key}': expected an artifact object or a string, got {other}"
                    ));
                }
            }
        }

        Ok(Self {
            version: raw.version,
            date: raw.date,
            docs: raw.docs,
            std_docs: raw.std_docs,
            src: raw.src,
            extra,
            platforms,
        })
    }
}

impl ReleaseEntry {
    /// Platform identifiers offered by this release, sorted lexically.
    pub fn platforms(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }

    /// Artifact for a platform identifier.
    pub fn artifact(&self, platform: &str) -> Option<&PlatformArtifact> {
        self.platforms.get(platform)
    }
}

/// The full release catalog: version identifier to [`ReleaseEntry`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ReleaseIndex {
    releases: BTreeMap<String, ReleaseEntry>,
}

impl ReleaseIndex {
    /// Decode an index from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Parse`] if the text is not JSON or not shaped like
    /// an index.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode an index from raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Parse`] under the same conditions as [`Self::from_json`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IndexError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Number of versions in the index.
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Whether the index lists no versions at all.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// All version identifiers, oldest first, with `master` last.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.releases.keys().map(String::as_str).collect();
        version::sort(&mut versions);
        versions
    }

    /// Look up the entry for a version identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownVersion`] if the identifier is not in the index.
    pub fn entry(&self, version: &str) -> Result<&ReleaseEntry, IndexError> {
        self.releases
            .get(version)
            .ok_or_else(|| IndexError::UnknownVersion(version.to_string()))
    }

    /// Resolve a version and platform to the archive download URL.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownVersion`] if the version is missing and
    /// [`IndexError::UnknownPlatform`] if the platform is missing or has no URL.
    pub fn resolve_url(&self, version: &str, platform: &str) -> Result<&str, IndexError> {
        self.entry(version)?
            .artifact(platform)
            .and_then(PlatformArtifact::url)
            .ok_or_else(|| IndexError::UnknownPlatform {
                version: version.to_string(),
                platform: platform.to_string(),
            })
    }
}
