//! The YesPlan collections harvested by this crate.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// A named REST collection exposed under `/api/{name}`.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Scheduled events.
    Events,
    /// Bookable resources (people, equipment, rooms).
    Resources,
    /// Contacts and organisations.
    Contacts,
    /// Venues and spaces.
    Locations,
    /// Labels attached to other objects.
    Labels,
}

impl Endpoint {
    /// Every endpoint, in harvest order.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Events,
        Endpoint::Resources,
        Endpoint::Contacts,
        Endpoint::Locations,
        Endpoint::Labels,
    ];

    /// The path segment used in the request URL.
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Events => "events",
            Endpoint::Resources => "resources",
            Endpoint::Contacts => "contacts",
            Endpoint::Locations => "locations",
            Endpoint::Labels => "labels",
        }
    }

    /// Restrict `ALL` to the given selection, preserving harvest order and
    /// dropping duplicates. An empty selection means every endpoint.
    pub fn ordered_selection(selected: &[Endpoint]) -> Vec<Endpoint> {
        if selected.is_empty() {
            return Self::ALL.to_vec();
        }
        Self::ALL
            .into_iter()
            .filter(|e| selected.contains(e))
            .collect()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_harvest_order() {
        let names: Vec<&str> = Endpoint::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(
            names,
            ["events", "resources", "contacts", "locations", "labels"]
        );
    }

    #[test]
    fn test_selection_keeps_fixed_order() {
        let picked = Endpoint::ordered_selection(&[
            Endpoint::Labels,
            Endpoint::Events,
            Endpoint::Labels,
        ]);
        assert_eq!(picked, vec![Endpoint::Events, Endpoint::Labels]);
    }

    #[test]
    fn test_empty_selection_means_all() {
        assert_eq!(Endpoint::ordered_selection(&[]), Endpoint::ALL.to_vec());
    }

    #[test]
    fn test_serializes_as_path_segment() {
        let json = serde_json::to_string(&Endpoint::Locations).unwrap();
        assert_eq!(json, "\"locations\"");
    }
}
