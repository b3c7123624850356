use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("truncation length must be at least 1, got {0}")]
    InvalidLength(usize),
    #[error("container layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}
