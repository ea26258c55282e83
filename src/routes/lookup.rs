//! Route lookup over the built-in table: exact distance lookup, city-name
//! normalization and substring suggestions.

use super::table::{route_key, BUILTIN_ROUTES};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// Known distance between two cities, in either direction.
///
/// Both names go through [`normalize_city_name`], so "São Paulo",
/// "SAO PAULO" and " sao paulo " all hit the same entry.
pub fn get_route_distance(origin: &str, destination: &str) -> Option<u32> {
    let origin = normalize_city_name(origin);
    let destination = normalize_city_name(destination);
    let forward = route_key(&origin, &destination);
    let backward = route_key(&destination, &origin);

    BUILTIN_ROUTES
        .iter()
        .find(|r| r.key() == forward)
        .or_else(|| BUILTIN_ROUTES.iter().find(|r| r.key() == backward))
        .map(|r| r.km)
}

/// Lowercase, strip diacritics (NFD then drop combining marks), trim.
pub fn normalize_city_name(city: &str) -> String {
    city.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSuggestion {
    pub destination: String,
    pub distance: u32,
}

/// Routes whose key contains the (normalized) input.
///
/// The suggested destination is the first city of the pair that differs
/// from the input. Results follow table order and are not deduplicated.
pub fn suggest_routes(city: &str) -> Vec<RouteSuggestion> {
    let q = normalize_city_name(city);

    BUILTIN_ROUTES
        .iter()
        .filter(|r| r.key().contains(&q))
        .filter_map(|r| {
            [r.from, r.to]
                .into_iter()
                .find(|c| *c != q)
                .map(|other| RouteSuggestion {
                    destination: other.to_string(),
                    distance: r.km,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_distance_both_directions() {
        assert_eq!(get_route_distance("Sao Paulo", "Rio de Janeiro"), Some(430));
        assert_eq!(get_route_distance("Rio de Janeiro", "Sao Paulo"), Some(430));
        assert_eq!(get_route_distance("SAO PAULO", "rio de janeiro"), Some(430));
    }

    #[test]
    fn test_route_distance_accents_and_spaces() {
        assert_eq!(get_route_distance("São Paulo", "Rio de Janeiro"), Some(430));
        assert_eq!(get_route_distance("  Brasília ", "Goiânia"), Some(209));
        assert_eq!(get_route_distance("Florianópolis", "Curitiba"), Some(300));
    }

    #[test]
    fn test_route_distance_unknown() {
        assert_eq!(get_route_distance("Manaus", "Belem"), None);
        assert_eq!(get_route_distance("Sao Paulo", "Sao Paulo"), None);
        assert_eq!(get_route_distance("", ""), None);
    }

    #[test]
    fn test_normalize_city_name() {
        assert_eq!(normalize_city_name("  São Paulo  "), "sao paulo");
        assert_eq!(normalize_city_name("GOIÂNIA"), "goiania");
        assert_eq!(normalize_city_name("Florianópolis"), "florianopolis");
        assert_eq!(normalize_city_name("Tromsø"), "tromsø"); // ø does not decompose
    }

    #[test]
    fn test_suggest_routes_full_name() {
        let s = suggest_routes("Recife");
        assert_eq!(
            s,
            vec![
                RouteSuggestion { destination: "salvador".into(), distance: 839 },
                RouteSuggestion { destination: "fortaleza".into(), distance: 800 },
            ]
        );
    }

    #[test]
    fn test_suggest_routes_accented_input() {
        let s = suggest_routes("Goiânia");
        assert_eq!(s, vec![RouteSuggestion { destination: "brasilia".into(), distance: 209 }]);
    }

    #[test]
    fn test_suggest_routes_counts() {
        // sao paulo appears in 7 routes, all with sao paulo on the left
        let s = suggest_routes("sao paulo");
        assert_eq!(s.len(), 7);
        assert_eq!(s[0].destination, "rio de janeiro");
        assert!(s.iter().all(|r| r.destination != "sao paulo"));
    }

    #[test]
    fn test_suggest_routes_partial_keeps_first_city() {
        // a partial name matches neither city exactly, so the first city of
        // the pair is reported
        let s = suggest_routes("goia");
        assert_eq!(s, vec![RouteSuggestion { destination: "brasilia".into(), distance: 209 }]);
        let s = suggest_routes("brasil");
        assert!(s.iter().any(|r| r.destination == "sao paulo" && r.distance == 1015));
    }

    #[test]
    fn test_suggest_routes_none() {
        assert!(suggest_routes("manaus").is_empty());
    }
}
