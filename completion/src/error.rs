use thiserror::Error;

use crate::trigger::RawTrigger;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("unsupported session trigger: {0:?}")]
    UnsupportedTrigger(RawTrigger),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CompletionError>;
