//! Keyword matching and highlighting over single lines of text.
//!
//! A [`KeywordSet`] carries two views of the operator's keywords: an AND
//! predicate (every keyword must occur) used to filter definitions, and an
//! OR pattern (any keyword) used to locate highlight spans.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// A validated, non-empty, case-insensitive set of keyword expressions.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    each: Vec<Regex>,
    any: Regex,
}

impl KeywordSet {
    /// Keywords that match as plain substrings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKeywords`] for an empty list and
    /// [`Error::BlankKeyword`] when a keyword is the empty string.
    pub fn literal<S: AsRef<str>>(expressions: &[S]) -> Result<Self> {
        Self::compile(expressions, true)
    }

    /// Keywords interpreted as regular expressions.
    ///
    /// # Errors
    ///
    /// Same as [`KeywordSet::literal`], plus [`Error::InvalidKeyword`] when a
    /// keyword is not a valid pattern.
    pub fn regex<S: AsRef<str>>(expressions: &[S]) -> Result<Self> {
        Self::compile(expressions, false)
    }

    fn compile<S: AsRef<str>>(expressions: &[S], escape: bool) -> Result<Self> {
        if expressions.is_empty() {
            return Err(Error::EmptyKeywords);
        }

        let mut sources = Vec::with_capacity(expressions.len());
        let mut each = Vec::with_capacity(expressions.len());

        for (position, expression) in expressions.iter().enumerate() {
            let expression = expression.as_ref();
            if expression.is_empty() {
                return Err(Error::BlankKeyword(position + 1));
            }

            let source = if escape {
                regex::escape(expression)
            } else {
                expression.to_string()
            };
            each.push(build(&source, expression)?);
            sources.push(source);
        }

        let alternation = sources
            .iter()
            .map(|source| format!("(?:{source})"))
            .collect::<Vec<_>>()
            .join("|");
        let any = build(&alternation, &alternation)?;

        Ok(Self { each, any })
    }

    /// The OR pattern: matches wherever any keyword occurs.
    #[must_use]
    pub fn or_pattern(&self) -> &Regex {
        &self.any
    }

    /// AND predicate: true only if every keyword occurs somewhere in `text`.
    #[must_use]
    pub fn matches_all(&self, text: &str) -> bool {
        self.each.iter().all(|regex| regex.is_match(text))
    }
}

fn build(pattern: &str, keyword: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::InvalidKeyword {
            keyword: keyword.to_string(),
            source,
        })
}

/// Wraps every non-overlapping OR match in `text` with `open` and `close`.
///
/// Matches are found leftmost-first on the original text, so the output keeps
/// the original casing and all unmatched text verbatim.
#[must_use]
pub fn highlight(text: &str, keywords: &KeywordSet, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for found in keywords.or_pattern().find_iter(text) {
        out.push_str(&text[last..found.start()]);
        out.push_str(open);
        out.push_str(found.as_str());
        out.push_str(close);
        last = found.end();
    }

    out.push_str(&text[last..]);
    out
}
