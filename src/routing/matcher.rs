//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route patterns (`"polls/"`, `"<int:question_id>/vote/"`)
//! - Match a pattern against the start of a path (prefix) or the whole path (exact)
//! - Capture typed path parameters
//! - Rebuild a path from a pattern and parameters (reverse)
//!
//! # Design Decisions
//! - Literal text is case-sensitive
//! - Converters are a closed set (`int`, `str`, `slug`, `path`); no regex
//! - Patterns are parsed once at startup; a bad pattern never reaches the hot path

use std::collections::BTreeMap;
use std::fmt;

use super::error::PatternError;

/// Parameters captured while matching, keyed by name.
pub type Params = BTreeMap<String, ParamValue>;

/// A captured path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(u128),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

/// Path converter attached to a `<converter:name>` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// One or more ASCII digits, up to `u128::MAX`.
    Int,
    /// Any non-empty text without `/`.
    Str,
    /// ASCII letters, digits, `-` and `_`.
    Slug,
    /// Any non-empty text, `/` included.
    Path,
}

impl Converter {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Converter::Int),
            "str" => Some(Converter::Str),
            "slug" => Some(Converter::Slug),
            "path" => Some(Converter::Path),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Converter::Int => "int",
            Converter::Str => "str",
            Converter::Slug => "slug",
            Converter::Path => "path",
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            Converter::Int => c.is_ascii_digit(),
            Converter::Str => c != '/',
            Converter::Slug => c.is_ascii_alphanumeric() || c == '-' || c == '_',
            Converter::Path => true,
        }
    }

    /// Whole-value check used when reversing.
    fn accepts_all(self, value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| self.accepts(c))
    }

    fn convert(self, raw: &str) -> Option<ParamValue> {
        match self {
            Converter::Int => raw.parse().ok().map(ParamValue::Int),
            _ => Some(ParamValue::Str(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

/// Result of a successful match: how many bytes were consumed and what was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatch {
    pub consumed: usize,
    pub params: Params,
}

impl PathPattern {
    /// Parse a pattern. `<name>` defaults to the `str` converter.
    pub fn parse(source: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source.as_str();

        while let Some(open) = rest.find('<') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('>').ok_or_else(|| PatternError::Unterminated {
                pattern: source.clone(),
            })?;
            let placeholder = &after[..close];

            let (converter, name) = match placeholder.split_once(':') {
                Some((conv, name)) => {
                    let converter =
                        Converter::from_name(conv).ok_or_else(|| PatternError::UnknownConverter {
                            pattern: source.clone(),
                            converter: conv.to_string(),
                        })?;
                    (converter, name)
                }
                None => (Converter::Str, placeholder),
            };

            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(PatternError::InvalidName {
                    pattern: source.clone(),
                    name: name.to_string(),
                });
            }
            let duplicate = segments
                .iter()
                .any(|s| matches!(s, Segment::Param { name: n, .. } if n == name));
            if duplicate {
                return Err(PatternError::DuplicateParam {
                    pattern: source.clone(),
                    name: name.to_string(),
                });
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Param {
                name: name.to_string(),
                converter,
            });
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source, segments })
    }

    /// The pattern text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match against the start of `path`.
    pub fn match_prefix(&self, path: &str) -> Option<PathMatch> {
        let mut params = Params::new();
        let consumed = match_segments(&self.segments, path, 0, false, &mut params)?;
        Some(PathMatch { consumed, params })
    }

    /// Match against the whole of `path`.
    pub fn match_exact(&self, path: &str) -> Option<PathMatch> {
        let mut params = Params::new();
        let consumed = match_segments(&self.segments, path, 0, true, &mut params)?;
        Some(PathMatch { consumed, params })
    }

    /// Rebuild the concrete path for this pattern.
    ///
    /// Returns `None` when a parameter is missing or its value is rejected by the converter.
    pub fn reverse(&self, params: &BTreeMap<String, String>) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param { name, converter } => {
                    let value = params.get(name)?;
                    if !converter.accepts_all(value) {
                        return None;
                    }
                    out.push_str(value);
                }
            }
        }
        Some(out)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Backtracking match of `segments` starting at byte `pos` of `path`.
/// Returns the end position of the match.
fn match_segments(
    segments: &[Segment],
    path: &str,
    pos: usize,
    exact: bool,
    params: &mut Params,
) -> Option<usize> {
    let Some((first, rest)) = segments.split_first() else {
        return (!exact || pos == path.len()).then_some(pos);
    };

    match first {
        Segment::Literal(text) => {
            if path[pos..].starts_with(text.as_str()) {
                match_segments(rest, path, pos + text.len(), exact, params)
            } else {
                None
            }
        }
        Segment::Param { name, converter } => {
            // Candidate end positions, longest run first.
            let run: Vec<usize> = path[pos..]
                .char_indices()
                .take_while(|&(_, c)| converter.accepts(c))
                .map(|(i, c)| pos + i + c.len_utf8())
                .collect();

            for &end in run.iter().rev() {
                // A run too large for the converter fails outright; a shorter
                // prefix of it would be a different number.
                let value = converter.convert(&path[pos..end])?;
                if let Some(done) = match_segments(rest, path, end, exact, params) {
                    params.insert(name.clone(), value);
                    return Some(done);
                }
            }
            None
        }
    }
}

/// Decides whether a route binding applies to a path.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the match if the path satisfies this condition.
    fn matches(&self, path: &str) -> Option<PathMatch>;

    /// The underlying pattern, used for listing and reversing.
    fn pattern(&self) -> &PathPattern;

    /// True when the binding only needs to match the start of the path.
    fn is_prefix(&self) -> bool;
}

/// Matches a pattern against the start of the path; the rest is left over.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    pattern: PathPattern,
}

impl PrefixMatcher {
    pub fn new(pattern: PathPattern) -> Self {
        Self { pattern }
    }
}

impl Matcher for PrefixMatcher {
    fn matches(&self, path: &str) -> Option<PathMatch> {
        self.pattern.match_prefix(path)
    }

    fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    fn is_prefix(&self) -> bool {
        true
    }
}

/// Matches a pattern against the entire path.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    pattern: PathPattern,
}

impl ExactMatcher {
    pub fn new(pattern: PathPattern) -> Self {
        Self { pattern }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> Option<PathMatch> {
        self.pattern.match_exact(path)
    }

    fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    fn is_prefix(&self) -> bool {
        false
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_literal_prefix() {
        let matcher = PrefixMatcher::new(PathPattern::parse("admin/").unwrap());

        let m = matcher.matches("admin/login/").unwrap();
        assert_eq!(m.consumed, "admin/".len());
        assert!(m.params.is_empty());

        assert!(matcher.matches("admin").is_none());
        assert!(matcher.matches("Admin/").is_none()); // Case sensitive
        assert!(matcher.matches("polls/").is_none());
    }

    #[test]
    fn test_exact_requires_whole_path() {
        let matcher = ExactMatcher::new(PathPattern::parse("").unwrap());
        assert!(matcher.matches("").is_some());
        assert!(matcher.matches("3/").is_none());
    }

    #[test]
    fn test_int_converter() {
        let pattern = PathPattern::parse("<int:question_id>/vote/").unwrap();

        let m = pattern.match_exact("42/vote/").unwrap();
        assert_eq!(m.params.get("question_id"), Some(&ParamValue::Int(42)));

        assert!(pattern.match_exact("abc/vote/").is_none());
        assert!(pattern.match_exact("42/vote/extra").is_none());
        assert!(pattern.match_prefix("42/vote/extra").is_some());
    }

    #[test]
    fn test_path_converter_backtracks() {
        let pattern = PathPattern::parse("files/<path:rest>/raw/").unwrap();
        let m = pattern.match_exact("files/a/b/c/raw/").unwrap();
        assert_eq!(
            m.params.get("rest"),
            Some(&ParamValue::Str("a/b/c".to_string()))
        );
    }

    #[test]
    fn test_str_and_slug() {
        let pattern = PathPattern::parse("<name>/<slug:tag>/").unwrap();
        let m = pattern.match_exact("alice/hello-world_2/").unwrap();
        assert_eq!(m.params.get("name"), Some(&ParamValue::Str("alice".into())));
        assert_eq!(
            m.params.get("tag"),
            Some(&ParamValue::Str("hello-world_2".into()))
        );
        assert!(pattern.match_exact("alice/hello world/").is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PathPattern::parse("<int:id"),
            Err(PatternError::Unterminated { .. })
        ));
        assert!(matches!(
            PathPattern::parse("<uuid:id>/"),
            Err(PatternError::UnknownConverter { .. })
        ));
        assert!(matches!(
            PathPattern::parse("<int:id>/<int:id>/"),
            Err(PatternError::DuplicateParam { .. })
        ));
        assert!(matches!(
            PathPattern::parse("<int:>/"),
            Err(PatternError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_reverse() {
        let pattern = PathPattern::parse("<int:question_id>/results/").unwrap();
        assert_eq!(
            pattern.reverse(&params(&[("question_id", "7")])).as_deref(),
            Some("7/results/")
        );
        assert!(pattern.reverse(&params(&[("question_id", "x")])).is_none());
        assert!(pattern.reverse(&params(&[])).is_none());
    }

    #[test]
    fn test_int_takes_whole_digit_run() {
        let pattern = PathPattern::parse("<int:n>").unwrap();

        let m = pattern.match_prefix("99999999999999999999x").unwrap();
        assert_eq!(m.consumed, 20);
        assert_eq!(
            m.params.get("n"),
            Some(&ParamValue::Int(99_999_999_999_999_999_999))
        );
    }

    #[test]
    fn test_int_overflow_fails_match() {
        let pattern = PathPattern::parse("<int:n>/").unwrap();
        let too_big = format!("{}0/", u128::MAX);
        assert!(pattern.match_exact(&too_big).is_none());
        assert!(pattern.match_prefix(&too_big).is_none());

        let max = format!("{}/", u128::MAX);
        assert_eq!(
            pattern.match_exact(&max).unwrap().params.get("n"),
            Some(&ParamValue::Int(u128::MAX))
        );
    }
}
