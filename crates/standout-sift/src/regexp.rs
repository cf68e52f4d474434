//! Boolean regular-expression tester.
//!
//! [`RegExp`] wraps a compiled [`Regex`] with one of two modes: search
//! anywhere in the input, or require the match to begin at the first
//! character. Neither mode requires the match to consume the whole input.

use regex::Regex;

use crate::error::Result;

/// A compiled pattern that answers "does this text match?".
///
/// # Example
///
/// ```
/// use standout_sift::RegExp;
///
/// let digits = RegExp::new(r"\d").unwrap();
/// assert!(digits.is_match("xx10xx"));
///
/// let leading = RegExp::anchored(r"\d").unwrap();
/// assert!(!leading.is_match("xx10xx"));
/// assert!(leading.is_match("10xx"));
/// ```
#[derive(Debug, Clone)]
pub struct RegExp {
    regex: Regex,
    anchored: bool,
}

impl RegExp {
    /// Compiles a pattern that may match anywhere in the input.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_mode(pattern, false)
    }

    /// Compiles a pattern that must match at the start of the input.
    pub fn anchored(pattern: &str) -> Result<Self> {
        Self::with_mode(pattern, true)
    }

    /// Compiles a pattern with an explicit mode.
    pub fn with_mode(pattern: &str, anchored: bool) -> Result<Self> {
        let regex = if anchored {
            // `\A` pins the match to offset 0 without pinning its end.
            Regex::new(&format!(r"\A(?:{pattern})"))?
        } else {
            Regex::new(pattern)?
        };
        Ok(RegExp { regex, anchored })
    }

    /// Returns `true` if the pattern matches `text` under this tester's mode.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns `true` for testers built with [`RegExp::anchored`].
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Returns the compiled pattern, including the anchor for anchored testers.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_finds_anywhere() {
        let re = RegExp::new(r"\d").unwrap();
        assert!(re.is_match("xx10xx"));
        assert!(re.is_match("10"));
        assert!(!re.is_match("xxxx"));
        assert!(!re.is_anchored());
    }

    #[test]
    fn anchored_requires_leading_match() {
        let re = RegExp::anchored(r"\d").unwrap();
        assert!(!re.is_match("xx10xx"));
        assert!(re.is_match("10xx"));
        assert!(re.is_anchored());
    }

    #[test]
    fn anchored_does_not_pin_the_end() {
        let re = RegExp::anchored("ab").unwrap();
        assert!(re.is_match("abcdef"));
    }

    #[test]
    fn anchored_alternation_is_grouped() {
        // Without the group, `\Aa|b` would accept a `b` anywhere.
        let re = RegExp::anchored("a|b").unwrap();
        assert!(re.is_match("bxx"));
        assert!(!re.is_match("xxb"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(RegExp::new("(unclosed").is_err());
        assert!(RegExp::anchored("(unclosed").is_err());
    }
}
