use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Account {0} is not an active DAO member")]
    NotMember(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Another submission is still pending")]
    Busy,

    #[error("{operation} failed: {detail}")]
    SubmissionFailed {
        operation: &'static str,
        detail: String,
    },
}
