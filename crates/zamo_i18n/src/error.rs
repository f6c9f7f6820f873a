use thiserror::Error;

use crate::catalog::CatalogParseError;
use crate::locale::Locale;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("unsupported locale `{0}`")]
    UnsupportedLocale(String),

    #[error("catalog for `{locale}` failed to load: {source}")]
    Catalog {
        locale: Locale,
        #[source]
        source: CatalogParseError,
    },
}
