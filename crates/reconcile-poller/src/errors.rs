use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("poll period must be greater than zero")]
    ZeroPeriod,

    #[error("at least one page keyword is required")]
    NoKeywords,
}
