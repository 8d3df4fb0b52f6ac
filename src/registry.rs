//! Supported-city registry.
//!
//! The set of cities the server answers for is injected into the server
//! rather than hard-coded in the handler, so tests can substitute small
//! fixtures and deployments can load a different list without touching the
//! connection loop.

use std::collections::HashSet;

/// The ten cities the stock server supports.
const ITALIAN_CITIES: [&str; 10] = [
    "bari", "roma", "milano", "napoli", "torino", "palermo", "genova", "bologna", "firenze",
    "venezia",
];

/// A fixed set of supported city names.
///
/// Membership is case-insensitive exact equality, ASCII folding only — no
/// prefix matching, no locale awareness.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: HashSet<String>,
}

impl CityRegistry {
    /// Build a registry from any iterable of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cities: names
                .into_iter()
                .map(|name| name.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The stock registry of ten Italian cities.
    pub fn italian() -> Self {
        Self::new(ITALIAN_CITIES)
    }

    /// Whether `name` is a supported city.
    pub fn is_supported(&self, name: &str) -> bool {
        self.cities.contains(&name.to_ascii_lowercase())
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::italian()
    }
}
