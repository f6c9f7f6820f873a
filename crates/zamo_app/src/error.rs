//! Application error types

use thiserror::Error;
use zamo_i18n::I18nError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Bundled or supplied translation catalogs could not be loaded
    #[error("failed to load translation catalogs: {0}")]
    Catalogs(#[from] I18nError),
}

/// Result type for application setup
pub type Result<T> = std::result::Result<T, AppError>;
