use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("invalid request payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("record {index} has a blank id")]
    BlankId { index: usize },

    #[error("record {id} has no admin status but the viewer is an admin")]
    MissingAdminStatus { id: String },

    #[error("unknown {kind} status code: {code}")]
    UnknownStatus { kind: &'static str, code: String },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("negative cost {cost} in {solution}")]
    NegativeCost { solution: String, cost: i64 },

    #[error("cost total overflowed in {solution}")]
    CostOverflow { solution: String },
}
