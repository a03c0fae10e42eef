//! Comparison operators

use std::fmt;

/// The three supported comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `==`
    Equal,
}

impl Operator {
    /// Parses an operator symbol. Anything other than `>`, `<` or `==`
    /// is unsupported and returns `None`.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Operator::GreaterThan),
            "<" => Some(Operator::LessThan),
            "==" => Some(Operator::Equal),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equal => "==",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
