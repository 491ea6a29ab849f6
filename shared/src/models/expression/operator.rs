use std::fmt;

use complex_rs::complex::Complex;

/// Binary operators, declared in split priority order: a formula is split at
/// `+` before `-`, at `-` before `/`, and so on down to `^`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Add,
    Sub,
    Div,
    Mul,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Div,
        Operator::Mul,
        Operator::Pow,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '/' => Some(Operator::Div),
            '*' => Some(Operator::Mul),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Div => '/',
            Operator::Mul => '*',
            Operator::Pow => '^',
        }
    }

    /// Whether a missing left operand reads as zero (a leading sign).
    pub fn allows_empty_lhs(self) -> bool {
        matches!(self, Operator::Add | Operator::Sub)
    }

    pub fn apply(self, lhs: Complex, rhs: Complex) -> Complex {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Div => lhs / rhs,
            Operator::Mul => lhs * rhs,
            Operator::Pow => lhs.pow(rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol('x'), None);
    }

    #[test]
    fn ordering_follows_split_priority() {
        let mut sorted = Operator::ALL;
        sorted.sort();
        assert_eq!(sorted, Operator::ALL);
        assert!(Operator::Add < Operator::Sub);
        assert!(Operator::Div < Operator::Mul);
    }
}
