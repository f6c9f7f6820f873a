use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::label::Args;
use crate::locale::Locale;
use crate::I18nError;

const BUNDLED: [(Locale, &str); 4] = [
    (Locale::En, include_str!("../locales/en.yml")),
    (Locale::Fr, include_str!("../locales/fr.yml")),
    (Locale::Pidgin, include_str!("../locales/pidgin.yml")),
    (Locale::Camfran, include_str!("../locales/camfran.yml")),
];

/// Catalogs for every loaded locale.
///
/// Lookups walk `locale -> fallback -> raw key`; a missing entry is a data
/// problem, never an error.
#[derive(Clone, Debug, Default)]
pub struct CatalogSet {
    catalogs: HashMap<Locale, Catalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the catalogs compiled into the crate.
    pub fn bundled() -> Result<Self, I18nError> {
        let mut set = Self::new();
        for (locale, src) in BUNDLED {
            set.load_yaml(locale, src)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, locale: Locale, catalog: Catalog) {
        self.catalogs.insert(locale, catalog);
    }

    /// Parse and load a YAML catalog for a locale, replacing any previous one.
    pub fn load_yaml(&mut self, locale: Locale, src: &str) -> Result<(), I18nError> {
        let catalog =
            Catalog::parse_yaml(src).map_err(|source| I18nError::Catalog { locale, source })?;
        debug!("loaded {} catalog ({} entries)", locale, catalog.len());
        self.insert(locale, catalog);
        Ok(())
    }

    pub fn catalog(&self, locale: Locale) -> Option<&Catalog> {
        self.catalogs.get(&locale)
    }

    /// Template for `key`, trying `locale` first and then `fallback`.
    pub fn lookup(&self, locale: Locale, fallback: Locale, key: &str) -> Option<&str> {
        if let Some(s) = self.catalogs.get(&locale).and_then(|c| c.get(key)) {
            return Some(s);
        }
        if fallback != locale {
            if let Some(s) = self.catalogs.get(&fallback).and_then(|c| c.get(key)) {
                debug!(
                    "translation key '{}' missing for {}, using {}",
                    key, locale, fallback
                );
                return Some(s);
            }
        }
        None
    }

    /// Resolve and interpolate `key`; returns the key itself when no catalog
    /// has it.
    pub fn translate(&self, locale: Locale, fallback: Locale, key: &str, args: &Args) -> String {
        match self.lookup(locale, fallback, key) {
            Some(tmpl) => crate::catalog::interpolate(tmpl, args),
            None => {
                debug!("missing translation key '{}', returning it as-is", key);
                key.to_string()
            }
        }
    }

    /// Keys present in `reference`'s catalog but absent from each other
    /// supported locale. Locales without any catalog report every key.
    pub fn missing_keys(&self, reference: Locale) -> Vec<(Locale, Vec<String>)> {
        let Some(base) = self.catalogs.get(&reference) else {
            warn!("reference catalog {} is not loaded", reference);
            return Vec::new();
        };

        Locale::ALL
            .into_iter()
            .filter(|l| *l != reference)
            .filter_map(|locale| {
                let missing: Vec<String> = base
                    .keys()
                    .into_iter()
                    .filter(|k| !self.catalogs.get(&locale).is_some_and(|c| c.contains(k)))
                    .map(str::to_string)
                    .collect();
                (!missing.is_empty()).then_some((locale, missing))
            })
            .collect()
    }
}
