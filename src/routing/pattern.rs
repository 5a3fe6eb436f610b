//! Compiled path patterns.
//!
//! A pattern is a `/`-separated list of segments. Each segment is one of:
//! - a literal, matched exactly (`gems`);
//! - a template with one `{name}` placeholder that matches a non-empty run of
//!   text, optionally wrapped in literal text (`{gem}.json`);
//! - `*` as the last segment, matching whatever remains (possibly nothing).
//!
//! Patterns only answer membership. Handlers that need the placeholder values
//! parse the path themselves.

use std::fmt;
use std::str::FromStr;

use crate::routing::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Template { prefix: String, suffix: String },
    Rest,
}

impl Segment {
    fn parse(segment: &str, source: &str, is_last: bool) -> Result<Self, Error> {
        if segment == "*" {
            return if is_last {
                Ok(Segment::Rest)
            } else {
                Err(Error::MisplacedWildcard(source.to_string()))
            };
        }

        let opens = segment.matches('{').count();
        let closes = segment.matches('}').count();
        match (opens, closes) {
            (0, 0) => Ok(Segment::Literal(segment.to_string())),
            (1, 1) => {
                let (prefix, rest) = segment
                    .split_once('{')
                    .ok_or_else(|| Error::UnbalancedBraces(source.to_string()))?;
                let (name, suffix) = rest
                    .split_once('}')
                    .ok_or_else(|| Error::UnbalancedBraces(source.to_string()))?;
                if name.trim().is_empty() {
                    return Err(Error::EmptyPlaceholder(source.to_string()));
                }
                Ok(Segment::Template {
                    prefix: prefix.to_string(),
                    suffix: suffix.to_string(),
                })
            }
            (o, c) if o == c => Err(Error::MultiplePlaceholders(source.to_string())),
            _ => Err(Error::UnbalancedBraces(source.to_string())),
        }
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == segment,
            Segment::Template { prefix, suffix } => {
                segment.len() > prefix.len() + suffix.len()
                    && segment.starts_with(prefix.as_str())
                    && segment.ends_with(suffix.as_str())
            }
            Segment::Rest => true,
        }
    }
}

/// A path pattern compiled into a segment matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let rest = source
            .strip_prefix('/')
            .ok_or_else(|| Error::MissingLeadingSlash(source.to_string()))?;

        let raw: Vec<&str> = rest.split('/').collect();
        let last = raw.len() - 1;
        let segments = raw
            .iter()
            .enumerate()
            .map(|(i, segment)| Segment::parse(segment, source, i == last))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern text this matcher was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern has no placeholders or wildcards.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Check a path (without query string) against the pattern.
    pub fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };
        let mut parts = rest.split('/');

        for segment in &self.segments {
            if *segment == Segment::Rest {
                return true;
            }
            match parts.next() {
                Some(part) if segment.matches(part) => {}
                _ => return false,
            }
        }

        parts.next().is_none()
    }
}

impl FromStr for PathPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> PathPattern {
        PathPattern::parse(source).unwrap()
    }

    #[test]
    fn test_literal_matches_exactly() {
        let p = pattern("/api/v1/gems");
        assert!(p.is_literal());
        assert!(p.matches("/api/v1/gems"));
        assert!(!p.matches("/api/v1/gems/"));
        assert!(!p.matches("/api/v1/gems/rails"));
        assert!(!p.matches("/api/v1"));
        assert!(!p.matches("api/v1/gems"));
    }

    #[test]
    fn test_root() {
        let p = pattern("/");
        assert!(p.matches("/"));
        assert!(!p.matches("/index.html"));
    }

    #[test]
    fn test_template_segment() {
        let p = pattern("/api/v1/gems/{gem}.json");
        assert!(!p.is_literal());
        assert!(p.matches("/api/v1/gems/rails.json"));
        assert!(p.matches("/api/v1/gems/rack-test.json"));
        assert!(!p.matches("/api/v1/gems/.json"));
        assert!(!p.matches("/api/v1/gems/rails.yaml"));
        assert!(!p.matches("/api/v1/gems/rails/extra.json"));
    }

    #[test]
    fn test_bare_placeholder_needs_a_segment() {
        let p = pattern("/gems/{name}");
        assert!(p.matches("/gems/rails"));
        assert!(!p.matches("/gems/"));
        assert!(!p.matches("/gems"));
    }

    #[test]
    fn test_trailing_wildcard() {
        let p = pattern("/gems/*");
        assert!(p.matches("/gems"));
        assert!(p.matches("/gems/"));
        assert!(p.matches("/gems/rails-7.1.0.gem"));
        assert!(p.matches("/gems/a/b/c"));
        assert!(!p.matches("/quick/Marshal.4.8"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert_eq!(PathPattern::parse("gems"), Err(Error::MissingLeadingSlash("gems".to_string())));
        assert!(matches!(PathPattern::parse("/gems/{name"), Err(Error::UnbalancedBraces(_))));
        assert!(matches!(PathPattern::parse("/gems/name}"), Err(Error::UnbalancedBraces(_))));
        assert!(matches!(PathPattern::parse("/gems/{a}-{b}"), Err(Error::MultiplePlaceholders(_))));
        assert!(matches!(PathPattern::parse("/gems/{}"), Err(Error::EmptyPlaceholder(_))));
        assert!(matches!(PathPattern::parse("/*/gems"), Err(Error::MisplacedWildcard(_))));
    }

    #[test]
    fn test_display_round_trips_source() {
        let p: PathPattern = "/api/v1/gems/{gem}.yaml".parse().unwrap();
        assert_eq!(p.to_string(), "/api/v1/gems/{gem}.yaml");
        assert_eq!(p.as_str(), "/api/v1/gems/{gem}.yaml");
    }
}
