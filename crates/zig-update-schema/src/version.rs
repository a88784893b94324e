//! Version ordering for release identifiers.
//!
//! Index keys are mostly semantic versions, but older releases use two-part
//! identifiers (`0.1`) and the development build is keyed `master`. Ordering
//! is: valid versions by semver precedence, then anything unparseable
//! (lexically), then `master`.

use std::cmp::Ordering;

/// Identifier of the latest development build.
pub const MASTER: &str = "master";

/// Sort key for a release identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Rank<'a> {
    Release(semver::Version),
    Unparsed(&'a str),
    Master,
}

impl<'a> Rank<'a> {
    fn of(id: &'a str) -> Self {
        if id == MASTER {
            return Self::Master;
        }
        parse_lenient(id).map_or(Self::Unparsed(id), Self::Release)
    }
}

/// Parse a release identifier as semver, padding missing minor/patch parts.
///
/// ```
/// use zig_update_schema::version::parse_lenient;
///
/// assert_eq!(parse_lenient("0.11").unwrap().to_string(), "0.11.0");
/// assert_eq!(parse_lenient("v0.9.1").unwrap().to_string(), "0.9.1");
/// assert!(parse_lenient("master").is_none());
/// ```
pub fn parse_lenient(id: &str) -> Option<semver::Version> {
    let id = id.strip_prefix('v').unwrap_or(id);
    if let Ok(v) = semver::Version::parse(id) {
        return Some(v);
    }

    let split = id.find(['-', '+']).unwrap_or(id.len());
    let (core, suffix) = id.split_at(split);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => return None,
    };
    semver::Version::parse(&padded).ok()
}

/// Compare two release identifiers.
pub fn compare(a: &str, b: &str) -> Ordering {
    Rank::of(a).cmp(&Rank::of(b))
}

/// Sort identifiers oldest first; `master` ends up last.
pub fn sort(ids: &mut [&str]) {
    ids.sort_by_cached_key(|id| Rank::of(*id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_not_lexical() {
        let mut ids = vec!["0.10.0", "0.9.1", "0.2.0", "0.11.0"];
        sort(&mut ids);
        assert_eq!(ids, vec!["0.2.0", "0.9.1", "0.10.0", "0.11.0"]);
    }

    #[test]
    fn master_is_newest() {
        let mut ids = vec!["master", "0.13.0", "0.1.1"];
        sort(&mut ids);
        assert_eq!(ids.last(), Some(&"master"));
        assert_eq!(compare("master", "99.0.0"), Ordering::Greater);
    }

    #[test]
    fn prerelease_before_release() {
        assert_eq!(compare("0.12.0-dev.1+abc", "0.12.0"), Ordering::Less);
        assert_eq!(compare("0.12.0-dev.2", "0.12.0-dev.10"), Ordering::Less);
    }

    #[test]
    fn short_identifiers_are_padded() {
        assert_eq!(compare("0.1", "0.1.1"), Ordering::Less);
        assert_eq!(compare("0.2", "0.1.1"), Ordering::Greater);
    }

    #[test]
    fn unparsed_between_releases_and_master() {
        let mut ids = vec!["master", "nightly", "0.13.0", "beta"];
        sort(&mut ids);
        assert_eq!(ids, vec!["0.13.0", "beta", "nightly", "master"]);
    }
}
