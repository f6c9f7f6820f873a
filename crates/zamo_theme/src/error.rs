use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme mode: {0:?} (expected light, dark or system)")]
    UnknownMode(String),
}
