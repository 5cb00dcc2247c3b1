use thiserror::Error;

// エンジン操作の失敗
// InvalidRule, InvariantViolation以外はすべて状態を変更せずに拒否された操作 (IllegalAction)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("round has not been started")]
    RoundNotStarted,
    #[error("round is already over")]
    RoundOver,
    #[error("seat{seat} cannot act while waiting for {expected}")]
    NotYourTurn { seat: usize, expected: &'static str },
    #[error("{action} is not allowed while waiting for {expected}")]
    UnexpectedAction {
        expected: &'static str,
        action: &'static str,
    },
    #[error("tile index {index} is out of range (hand size: {len})")]
    InvalidIndex { index: usize, len: usize },
    #[error("{0} is not available for the last discard")]
    IllegalCall(String),
    #[error("hand is not tenpai after discarding {0}")]
    NotTenpai(String),
    #[error("invalid guess: {0}")]
    InvalidGuess(String),
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    // 呼び出し側の誤りによる拒否かどうか
    pub fn is_illegal_action(&self) -> bool {
        !matches!(
            self,
            EngineError::InvalidRule(_) | EngineError::InvariantViolation(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
