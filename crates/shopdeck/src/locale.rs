//! Storefront category names.
//!
//! The storefront shows category names in the shopper's language from static
//! lookup tables. A missing translation falls back to English, and a missing
//! English entry falls back to the slug itself.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
    De,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Es, Locale::Fr, Locale::De];

    /// Parse a language tag like `es`, `es-MX` or `fr_CA`. Unknown tags map to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "es" => Locale::Es,
            "fr" => Locale::Fr,
            "de" => Locale::De,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::Es => ES,
            Locale::Fr => FR,
            Locale::De => DE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const EN: &[(&str, &str)] = &[
    ("electronics", "Electronics"),
    ("clothing", "Clothing"),
    ("food", "Food & Grocery"),
    ("home", "Home & Garden"),
    ("beauty", "Beauty"),
    ("sports", "Sports & Outdoors"),
    ("toys", "Toys & Games"),
    ("books", "Books"),
];

const ES: &[(&str, &str)] = &[
    ("electronics", "Electrónica"),
    ("clothing", "Ropa"),
    ("food", "Alimentos"),
    ("home", "Hogar y Jardín"),
    ("beauty", "Belleza"),
    ("sports", "Deportes"),
    ("toys", "Juguetes"),
    ("books", "Libros"),
];

const FR: &[(&str, &str)] = &[
    ("electronics", "Électronique"),
    ("clothing", "Vêtements"),
    ("food", "Épicerie"),
    ("home", "Maison et Jardin"),
    ("beauty", "Beauté"),
    ("sports", "Sports et Loisirs"),
    ("books", "Livres"),
];

const DE: &[(&str, &str)] = &[
    ("electronics", "Elektronik"),
    ("clothing", "Bekleidung"),
    ("food", "Lebensmittel"),
    ("home", "Haus & Garten"),
    ("beauty", "Schönheit"),
    ("sports", "Sport & Freizeit"),
    ("toys", "Spielzeug"),
];

fn lookup(locale: Locale, slug: &str) -> Option<&'static str> {
    locale
        .table()
        .iter()
        .find(|(key, _)| *key == slug)
        .map(|(_, name)| *name)
}

/// Display name of a category slug.
pub fn category_name(slug: &str, locale: Locale) -> String {
    lookup(locale, slug)
        .or_else(|| lookup(Locale::En, slug))
        .map(str::to_string)
        .unwrap_or_else(|| slug.to_string())
}

/// Every category slug known to the English table, in display order.
pub fn category_slugs() -> impl Iterator<Item = &'static str> {
    EN.iter().map(|(slug, _)| *slug)
}
