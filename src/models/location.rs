use std::fmt;

/// City / state / country triple shared by teams and events.
///
/// Values are fixed at construction; a refresh replaces the whole location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl Location {
    pub fn new(city: Option<String>, state: Option<String>, country: Option<String>) -> Self {
        Self {
            city,
            state,
            country,
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Single-line "City, State, Country" form. Missing or blank parts are skipped.
    pub fn display_string(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_location_string() {
        let location = Location::new(
            Some("San Jose".to_string()),
            Some("CA".to_string()),
            Some("USA".to_string()),
        );
        assert_eq!(location.display_string(), "San Jose, CA, USA");
        assert_eq!(location.to_string(), "San Jose, CA, USA");
    }

    #[test]
    fn test_partial_location_skips_missing_parts() {
        let location = Location::new(Some("Toronto".to_string()), None, Some("Canada".to_string()));
        assert_eq!(location.display_string(), "Toronto, Canada");

        let blank_state = Location::new(Some("Tel Aviv".to_string()), Some("  ".to_string()), None);
        assert_eq!(blank_state.display_string(), "Tel Aviv");
    }

    #[test]
    fn test_empty_location() {
        assert_eq!(Location::default().display_string(), "");
        assert_eq!(Location::default().state(), None);
    }
}
