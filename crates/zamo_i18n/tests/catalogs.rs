use pretty_assertions::assert_eq;
use zamo_i18n::{Args, CatalogSet, Locale};

fn bundled() -> CatalogSet {
    CatalogSet::bundled().expect("bundled catalogs parse")
}

#[test]
fn every_locale_has_a_catalog() {
    let set = bundled();
    for locale in Locale::ALL {
        let catalog = set.catalog(locale).expect("catalog loaded");
        assert!(!catalog.is_empty(), "{locale} catalog is empty");
    }
}

#[test]
fn bundled_catalogs_share_the_default_key_set() {
    let set = bundled();
    assert!(set.missing_keys(Locale::En).is_empty());

    let en_keys = set.catalog(Locale::En).unwrap().keys();
    for locale in Locale::ALL {
        assert_eq!(
            set.catalog(locale).unwrap().keys(),
            en_keys,
            "{locale} has keys the default catalog lacks"
        );
    }
}

#[test]
fn login_label_per_locale() {
    let set = bundled();
    let none = Args::new();
    assert_eq!(set.translate(Locale::En, Locale::En, "auth.login", &none), "Login");
    assert_eq!(
        set.translate(Locale::Fr, Locale::En, "auth.login", &none),
        "Connexion"
    );
}

#[test]
fn pin_description_takes_count_in_every_locale() {
    let set = bundled();
    let args = Args::new().arg("count", 4);
    for locale in Locale::ALL {
        let s = set.translate(locale, Locale::En, "auth.createPinDescription", &args);
        assert!(s.contains('4'), "{locale}: {s}");
        assert!(!s.contains("{{count}}"), "{locale}: {s}");
    }
}

#[test]
fn templates_only_use_known_placeholders() {
    // Every placeholder a locale uses must also appear in the English
    // template for the same key, otherwise callers cannot know to pass it.
    fn placeholders(s: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut rest = s;
        while let Some(open) = rest.find("{{") {
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else { break };
            out.push(after[..close].trim().to_string());
            rest = &after[close + 2..];
        }
        out.sort();
        out
    }

    let set = bundled();
    let en = set.catalog(Locale::En).unwrap();
    for locale in Locale::ALL {
        let catalog = set.catalog(locale).unwrap();
        for key in en.keys() {
            assert_eq!(
                placeholders(catalog.get(key).unwrap()),
                placeholders(en.get(key).unwrap()),
                "{locale}:{key}"
            );
        }
    }
}
