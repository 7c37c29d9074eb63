use thiserror::Error;

/// Terminal failures. The `Display` text is exactly what gets printed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FlashError {
    /// The display report has no usable entry for this name.
    #[error("Display '{0}' not found")]
    DisplayNameNotFound(String),
    /// A display id was resolved but no live screen carries it.
    #[error("EINK display not found")]
    ScreenNotFound,
}
