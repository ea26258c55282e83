//! Route lookup subsystem.
//!
//! A read-only table of city pairs with known distances, used to sanity-check
//! the distance typed in for a trip and to suggest destinations.

pub mod lookup;
pub mod table;

pub use lookup::{get_route_distance, normalize_city_name, suggest_routes, RouteSuggestion};
pub use table::{route_key, route_list, RouteInfo};
