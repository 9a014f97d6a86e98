use std::fmt::{Display, Formatter};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 20;

/// Ticker read from a mount point, uppercased, e.g. `AAPL` or `VOD:LSE`.
///
/// Only the characters the securities services accept are allowed, so the
/// value can be placed in a query string after URL encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        let allowed = |ch: char| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | ':' | '_');

        let mut chars = normalized.chars().enumerate();
        match chars.next() {
            None => return Err(ValidationError::EmptySymbol),
            Some((_, ch)) if !ch.is_ascii_alphanumeric() => {
                return Err(ValidationError::SymbolInvalidStart { ch })
            }
            Some(_) => {}
        }
        if let Some((index, ch)) = chars.find(|&(_, ch)| !allowed(ch)) {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        let len = normalized.len();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
