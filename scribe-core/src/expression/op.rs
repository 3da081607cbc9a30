use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOpType {
    Multiplication,
    Division,
    Remainder,
    Addition,
    Subtraction,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOpType {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOpType::Equal
                | BinaryOpType::NotEqual
                | BinaryOpType::Less
                | BinaryOpType::Greater
                | BinaryOpType::LessEqual
                | BinaryOpType::GreaterEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOpType::And | BinaryOpType::Or)
    }
}

impl Display for BinaryOpType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOpType::Multiplication => "Multiplication",
            BinaryOpType::Division => "Division",
            BinaryOpType::Remainder => "Remainder",
            BinaryOpType::Addition => "Addition",
            BinaryOpType::Subtraction => "Subtraction",
            BinaryOpType::Equal => "Equal",
            BinaryOpType::NotEqual => "NotEqual",
            BinaryOpType::Less => "Less",
            BinaryOpType::Greater => "Greater",
            BinaryOpType::LessEqual => "LessEqual",
            BinaryOpType::GreaterEqual => "GreaterEqual",
            BinaryOpType::And => "And",
            BinaryOpType::Or => "Or",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpType {
    Negative,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Contains,
    StartsWith,
    EndsWith,
}

impl PatternKind {
    /// Wrap a constant pattern with the `%` wildcards this kind needs.
    pub fn decorate(&self, value: &str) -> String {
        match self {
            PatternKind::Contains => format!("%{value}%"),
            PatternKind::StartsWith => format!("{value}%"),
            PatternKind::EndsWith => format!("%{value}"),
        }
    }

    /// Evaluate the pattern test in memory.
    pub fn matches(&self, target: &str, pattern: &str) -> bool {
        match self {
            PatternKind::Contains => target.contains(pattern),
            PatternKind::StartsWith => target.starts_with(pattern),
            PatternKind::EndsWith => target.ends_with(pattern),
        }
    }

    pub fn prefix_wildcard(&self) -> bool {
        matches!(self, PatternKind::Contains | PatternKind::EndsWith)
    }

    pub fn suffix_wildcard(&self) -> bool {
        matches!(self, PatternKind::Contains | PatternKind::StartsWith)
    }
}
