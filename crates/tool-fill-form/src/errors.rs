use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FillError {
    #[error("fill already in progress for {page} (generation {generation})")]
    InProgress { page: String, generation: u64 },
}
