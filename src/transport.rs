//! Transport modes and their static tables: emission factors, display
//! names and recommendations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported means of transport.
///
/// Serialized as the lowercase identifier (`"car"`, `"plane"`, ...), which is
/// also the form stored in the trip history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Plane,
    Bike,
}

impl TransportMode {
    /// Every mode, in table order.
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Plane,
        TransportMode::Bike,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bus => "bus",
            Self::Train => "train",
            Self::Plane => "plane",
            Self::Bike => "bike",
        }
    }

    /// Emission factor in kg CO2 per km.
    pub fn emission_factor(self) -> f64 {
        match self {
            Self::Car => 0.192,   // gasoline car
            Self::Bus => 0.089,   // conventional bus
            Self::Train => 0.041, // electric train
            Self::Plane => 0.255, // commercial flight
            Self::Bike => 0.0,
        }
    }

    /// Localized (pt-BR) display label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Car => "Carro",
            Self::Bus => "Ônibus",
            Self::Train => "Trem",
            Self::Plane => "Avião",
            Self::Bike => "Bicicleta",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Car => &[
                "Considere fazer carona solidária para dividir as emissões",
                "Verifique a manutenção do veículo para melhor eficiência",
                "Planeje rotas mais eficientes para reduzir o consumo",
                "Considere um veículo elétrico ou híbrido para viagens futuras",
            ],
            Self::Bus => &[
                "Ótima escolha! O ônibus é mais eficiente que carros individuais",
                "Prefira empresas com frotas mais modernas e eficientes",
                "Combine com outros meios de transporte sustentável",
            ],
            Self::Train => &[
                "Excelente escolha! O trem é um dos meios mais sustentáveis",
                "Trens elétricos têm menor impacto ambiental",
                "Continue optando por transporte ferroviário quando possível",
            ],
            Self::Plane => &[
                "Considere alternativas terrestres para distâncias menores",
                "Voos diretos emitem menos CO2 que voos com escalas",
                "Compense suas emissões através de projetos ambientais",
                "Agrupe suas viagens aéreas quando possível",
            ],
            Self::Bike => &[
                "Parabéns! Você escolheu o meio de transporte mais sustentável",
                "Continue promovendo a mobilidade ativa e saudável",
                "Inspire outros a adotar a bicicleta como meio de transporte",
            ],
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Returned when an identifier names no known mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransport(pub String);

impl FromStr for TransportMode {
    type Err = UnknownTransport;

    /// Identifiers are matched exactly, as stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.id() == s)
            .ok_or_else(|| UnknownTransport(s.to_string()))
    }
}

/// A transport entry for listings (CLI help, `/api/transports`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportInfo {
    pub id: TransportMode,
    pub name: &'static str,
    pub emission_factor: f64,
    pub recommendations: &'static [&'static str],
}

pub fn transport_list() -> Vec<TransportInfo> {
    TransportMode::ALL
        .iter()
        .map(|&mode| TransportInfo {
            id: mode,
            name: mode.display_name(),
            emission_factor: mode.emission_factor(),
            recommendations: mode.recommendations(),
        })
        .collect()
}
