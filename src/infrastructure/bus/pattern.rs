//! Channel pattern matching for bus subscriptions.
//!
//! A subscription targets either an exact channel name or a wildcard with a
//! single trailing `*` (e.g. `"content.*"` matches every channel sharing the
//! `"content."` prefix). The parsed pattern retains its source string so that
//! dispatch can compare the pattern a message was delivered under against the
//! one a handler was registered with; two subscriptions on overlapping
//! wildcard prefixes must never cross-fire.

/// A compiled channel pattern retaining its original source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPattern {
    source: String,
    kind: PatternKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
    Exact,
    /// Trailing-`*` wildcard; holds the fixed prefix before the `*`.
    Prefix(String),
}

impl ChannelPattern {
    /// Parses a subscription pattern.
    ///
    /// A single `*` in the final position makes the pattern a prefix wildcard;
    /// any other string is treated as an exact channel name. A `*` anywhere
    /// else has no special meaning (the transport-level glob is anchored to
    /// the same trailing-`*` shape).
    pub fn parse(pattern: &str) -> Self {
        let kind = match pattern.strip_suffix('*') {
            Some(prefix) if !prefix.contains('*') => PatternKind::Prefix(prefix.to_string()),
            _ => PatternKind::Exact,
        };
        Self {
            source: pattern.to_string(),
            kind,
        }
    }

    /// The pattern exactly as registered. Used both as the transport-level
    /// subscription argument and as the identity compared against the pattern
    /// a delivery arrives under.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, PatternKind::Prefix(_))
    }

    /// Whether a concrete channel name falls within this pattern.
    pub fn matches(&self, channel: &str) -> bool {
        match &self.kind {
            PatternKind::Exact => self.source == channel,
            PatternKind::Prefix(prefix) => channel.starts_with(prefix.as_str()),
        }
    }
}

impl std::fmt::Display for ChannelPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pattern_matches_only_itself() {
        let p = ChannelPattern::parse("content.created");
        assert!(!p.is_wildcard());
        assert!(p.matches("content.created"));
        assert!(!p.matches("content.updated"));
        assert!(!p.matches("content.created.extra"));
    }

    #[test]
    fn wildcard_pattern_matches_prefix() {
        let p = ChannelPattern::parse("content.*");
        assert!(p.is_wildcard());
        assert!(p.matches("content.created"));
        assert!(p.matches("content.updated"));
        assert!(p.matches("content."));
        assert!(!p.matches("user.created"));
    }

    #[test]
    fn bare_star_matches_everything() {
        let p = ChannelPattern::parse("*");
        assert!(p.is_wildcard());
        assert!(p.matches("anything"));
        assert!(p.matches(""));
    }

    #[test]
    fn inner_star_is_literal() {
        let p = ChannelPattern::parse("a*b");
        assert!(!p.is_wildcard());
        assert!(p.matches("a*b"));
        assert!(!p.matches("axb"));
    }

    #[test]
    fn source_is_preserved_verbatim() {
        assert_eq!(ChannelPattern::parse("test:content.*").source(), "test:content.*");
        assert_eq!(ChannelPattern::parse("plain").source(), "plain");
    }

    #[test]
    fn overlapping_wildcards_have_distinct_identity() {
        let a = ChannelPattern::parse("content.*");
        let b = ChannelPattern::parse("content.c*");
        assert!(a.matches("content.created"));
        assert!(b.matches("content.created"));
        assert_ne!(a, b);
    }
}
