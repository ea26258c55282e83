//! Plain-text rendering of results, history, statistics and comparisons for
//! the terminal.

use crate::calculator::{format_co2, Statistics, TransportComparison};
use crate::planner::TripReport;
use crate::routes::RouteSuggestion;
use crate::transport::TransportMode;
use crate::trips::{Trip, TripHistory};
use chrono::Local;
use std::collections::BTreeMap;

const RULE: &str = "  ══════════════════════════════════════════════════════\n";

pub fn render_result(report: &TripReport) -> String {
    let trip = &report.trip;
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str(&format!("  \u{1F4CD} {} \u{2192} {}\n", trip.origin, trip.destination));
    out.push_str(&format!("  \u{1F697} {}  |  \u{1F4CF} {} km\n", report.transport_name, trip.distance));
    out.push_str(&format!("  \u{1F331} CO2 total:      {}\n", report.co2_total_display));
    out.push_str(&format!(
        "  \u{1F465} Por pessoa:     {} ({} passageiro(s))\n",
        report.co2_per_person_display, trip.passengers
    ));
    out.push_str(&format!("  \u{1F4CA} Impacto:        {}\n", report.impact.label));
    out.push_str(RULE);
    out.push_str("  Recomendações:\n");
    for rec in report.recommendations {
        out.push_str(&format!("    \u{2022} {}\n", rec));
    }
    out
}

fn render_trip(trip: &Trip) -> String {
    let date = trip.timestamp.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S");
    format!(
        "  \u{1F552} {}\n  \u{1F4CD} {} \u{2192} {}\n  \u{1F697} {} | \u{1F4CF} {} km | \u{1F465} {} passageiro(s)\n  \u{1F331} Emissões: {} ({}/pessoa)\n",
        date,
        trip.origin,
        trip.destination,
        trip.transport.display_name(),
        trip.distance,
        trip.passengers,
        format_co2(trip.co2_total),
        format_co2(trip.co2_per_person),
    )
}

/// Most recent trip first.
pub fn render_history(history: &TripHistory) -> String {
    if history.is_empty() {
        return "  Nenhuma viagem registrada ainda.\n".to_string();
    }
    history
        .newest_first()
        .map(render_trip)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_statistics(stats: Option<&Statistics>) -> String {
    let Some(s) = stats else {
        return "  Nenhuma viagem registrada ainda.\n".to_string();
    };
    let mut out = String::new();
    out.push_str(&format!("  Viagens:               {}\n", s.total_trips));
    out.push_str(&format!("  Emissões totais:       {}\n", format_co2(s.total_co2)));
    out.push_str(&format!("  Média por viagem:      {}\n", format_co2(s.average_co2)));
    out.push_str(&format!("  Distância total:       {:.0} km\n", s.total_distance));
    out.push_str(&format!("  Transporte mais usado: {}\n", s.most_used_transport_name()));
    out.push_str(&format!(
        "  Equivale a {} árvore(s) por ano ou {} km de carro\n",
        s.comparisons.trees_needed, s.comparisons.km_car_equivalent
    ));
    out
}

pub fn render_comparison(table: &BTreeMap<TransportMode, TransportComparison>) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:<10} {:>16} {:>16}  {}\n", "Transporte", "Total", "Por pessoa", "Impacto"));
    for row in table.values() {
        out.push_str(&format!(
            "  {:<10} {:>16} {:>16}  {}\n",
            row.name,
            format_co2(row.total),
            format_co2(row.per_person),
            row.impact.label
        ));
    }
    out
}

pub fn render_suggestions(city: &str, suggestions: &[RouteSuggestion]) -> String {
    if suggestions.is_empty() {
        return format!("  Nenhuma rota conhecida para '{}'.\n", city);
    }
    suggestions
        .iter()
        .map(|s| format!("  {} \u{2192} {} ({} km)\n", city, s.destination, s.distance))
        .collect()
}
