//! Built-in dataset of popular Brazilian routes (road distances in km).

use serde::Serialize;

/// Separator between the two cities of a route key.
pub const KEY_SEPARATOR: char = '-';

pub(super) struct BuiltinRoute {
    pub from: &'static str, // normalized
    pub to: &'static str,
    pub km: u32,
}

impl BuiltinRoute {
    pub fn key(&self) -> String {
        route_key(self.from, self.to)
    }
}

pub(super) const BUILTIN_ROUTES: &[BuiltinRoute] = &[
    // São Paulo
    BuiltinRoute { from: "sao paulo", to: "rio de janeiro", km: 430 },
    BuiltinRoute { from: "sao paulo", to: "belo horizonte", km: 586 },
    BuiltinRoute { from: "sao paulo", to: "curitiba", km: 408 },
    BuiltinRoute { from: "sao paulo", to: "brasilia", km: 1015 },
    BuiltinRoute { from: "sao paulo", to: "salvador", km: 1962 },
    BuiltinRoute { from: "sao paulo", to: "fortaleza", km: 3025 },
    BuiltinRoute { from: "sao paulo", to: "porto alegre", km: 1109 },
    // Rio de Janeiro
    BuiltinRoute { from: "rio de janeiro", to: "belo horizonte", km: 434 },
    BuiltinRoute { from: "rio de janeiro", to: "brasilia", km: 1148 },
    BuiltinRoute { from: "rio de janeiro", to: "salvador", km: 1649 },
    BuiltinRoute { from: "rio de janeiro", to: "curitiba", km: 852 },
    // Belo Horizonte
    BuiltinRoute { from: "belo horizonte", to: "brasilia", km: 716 },
    BuiltinRoute { from: "belo horizonte", to: "salvador", km: 1372 },
    BuiltinRoute { from: "belo horizonte", to: "curitiba", km: 1004 },
    // Others
    BuiltinRoute { from: "brasilia", to: "goiania", km: 209 },
    BuiltinRoute { from: "brasilia", to: "salvador", km: 1446 },
    BuiltinRoute { from: "brasilia", to: "fortaleza", km: 2200 },
    BuiltinRoute { from: "salvador", to: "fortaleza", km: 1389 },
    BuiltinRoute { from: "salvador", to: "recife", km: 839 },
    BuiltinRoute { from: "fortaleza", to: "recife", km: 800 },
    BuiltinRoute { from: "curitiba", to: "florianopolis", km: 300 },
    BuiltinRoute { from: "curitiba", to: "porto alegre", km: 711 },
    BuiltinRoute { from: "porto alegre", to: "florianopolis", km: 476 },
];

pub fn route_key(a: &str, b: &str) -> String {
    format!("{}{}{}", a, KEY_SEPARATOR, b)
}

/// A route entry for the public route list (autocomplete / API).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    pub origin: String,
    pub destination: String,
    pub distance: u32,
}

/// The full built-in route list, in table order.
pub fn route_list() -> Vec<RouteInfo> {
    BUILTIN_ROUTES
        .iter()
        .map(|r| RouteInfo {
            origin: r.from.to_string(),
            destination: r.to.to_string(),
            distance: r.km,
        })
        .collect()
}
