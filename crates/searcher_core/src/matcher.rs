use regex::Regex;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid search pattern '{pattern}': {message}")]
    Invalid { pattern: String, message: String },
}

/// Full-string regular expression test over a fetched body.
///
/// The pattern must match the entire body, not a substring of it. Callers who
/// want "contains" semantics wrap the term themselves, e.g. `(?s).*term.*`;
/// without `(?s)` the `.` does not cross newlines.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    pattern: String,
    // None for the empty pattern, which never matches.
    regex: Option<Regex>,
}

impl ContentMatcher {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Ok(Self {
                pattern: String::new(),
                regex: None,
            });
        }
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|err| PatternError::Invalid {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, body: &str) -> bool {
        if body.is_empty() {
            return false;
        }
        self.regex
            .as_ref()
            .map(|regex| regex.is_match(body))
            .unwrap_or(false)
    }
}

/// Total convenience form: false for empty inputs and for patterns that do not compile.
pub fn matches(body: &str, pattern: &str) -> bool {
    if body.is_empty() || pattern.is_empty() {
        return false;
    }
    ContentMatcher::new(pattern)
        .map(|matcher| matcher.is_match(body))
        .unwrap_or(false)
}
