use std::fmt;

/// Baseline text that is not a well-formed JSON array of finite numbers.
///
/// Carried by [`crate::compare::parse_baseline`]; the store maps this to an
/// empty expected sequence at its load boundary rather than surfacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed baseline text: {}", self.0)
    }
}

impl std::error::Error for ParseError {}
