use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unbalanced bracket at position {0}")]
    UnbalancedBrackets(usize),

    #[error("missing operand")]
    EmptyOperand,

    #[error("invalid term `{0}`")]
    InvalidTerminal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown variable: {0}")]
    UnboundVariable(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
