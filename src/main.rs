use clap::{Parser, Subcommand};
use ecotrip::controller::{Controller, Presenter};
use ecotrip::planner::{TripForm, TripReport};
use ecotrip::report;
use ecotrip::routes;
use ecotrip::server;
use ecotrip::transport::transport_list;
use ecotrip::trips::{JsonFileStore, TripHistory};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// EcoTrip — CO2 emissions calculator for trips
///
/// Estimates the CO2 emitted by a trip for a given transport mode and
/// passenger count, keeps the last 50 trips, and compares transports.
///
/// Examples:
///   ecotrip calc "Sao Paulo" "Rio de Janeiro" -d 430 -t car -p 2
///   ecotrip compare -d 1000 -p 3
///   ecotrip suggest Curitiba
///   ecotrip serve --port 8080
#[derive(Parser)]
#[command(name = "ecotrip", version, about, long_about = None)]
struct Cli {
    /// Trip history file. Defaults to ~/.ecotrip/history.json.
    #[arg(long, global = true, env = "ECOTRIP_HISTORY")]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate a trip's emissions and add it to the history.
    Calc {
        origin: String,
        destination: String,
        /// Distance in km.
        #[arg(long, short = 'd')]
        distance: String,
        /// car, bus, train, plane or bike.
        #[arg(long, short = 't')]
        transport: String,
        #[arg(long, short = 'p', default_value = "1")]
        passengers: String,
        /// Accept the known route distance without asking.
        #[arg(long, short = 'y')]
        yes: bool,
        /// Print the result as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Compare every transport mode for the same trip.
    Compare {
        #[arg(long, short = 'd')]
        distance: String,
        #[arg(long, short = 'p', default_value = "1")]
        passengers: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the trip history, most recent first.
    History,
    /// Aggregate statistics over the history.
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Delete the whole history.
    Clear {
        /// Do not ask for confirmation.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Known distance between two cities.
    Route { origin: String, destination: String },
    /// Known routes from a city.
    Suggest { city: String },
    /// List transport modes and their emission factors.
    Transports,
    /// Serve the JSON API for the browser front-end.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

/// Notifications on stderr, results on stdout, prompts read from stdin.
struct TerminalPresenter {
    assume_yes: bool,
    json: bool,
}

impl Presenter for TerminalPresenter {
    fn show_error(&mut self, message: &str) {
        eprintln!("  \u{274C} Erro: {}", message);
    }

    fn show_success(&mut self, message: &str) {
        eprintln!("  \u{2713} {}", message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("  {} [s/N] ", prompt);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
    }

    fn render_result(&mut self, result: &TripReport) {
        if self.json {
            print_json(result);
        } else {
            print!("{}", report::render_result(result));
        }
    }

    fn render_history(&mut self, history: &TripHistory) {
        print!("{}", report::render_history(history));
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("cannot serialize output: {}", e),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = match cli.history_file {
        Some(path) => JsonFileStore::at(path),
        None => JsonFileStore::open_default(),
    };
    log::debug!("trip history at {}", store.path().display());

    let presenter = |assume_yes: bool, json: bool| TerminalPresenter { assume_yes, json };

    match cli.command {
        Command::Calc { origin, destination, distance, transport, passengers, yes, json } => {
            let form = TripForm { origin, destination, distance, transport, passengers };
            let mut controller = Controller::new(store, presenter(yes, json));
            if controller.submit(&form).is_err() {
                return ExitCode::FAILURE;
            }
        }

        Command::Compare { distance, passengers, json } => {
            let mut controller = Controller::new(store, presenter(false, false));
            let Ok(table) = controller.compare(&distance, &passengers) else {
                return ExitCode::FAILURE;
            };
            if json {
                print_json(&table);
            } else {
                print!("{}", report::render_comparison(&table));
            }
        }

        Command::History => {
            Controller::new(store, presenter(false, false)).show_history();
        }

        Command::Stats { json } => {
            let stats = Controller::new(store, presenter(false, false)).statistics();
            if json {
                print_json(&stats);
            } else {
                print!("{}", report::render_statistics(stats.as_ref()));
            }
        }

        Command::Clear { yes } => {
            let mut controller = Controller::new(store, presenter(yes, false));
            if controller.clear_history().is_err() {
                return ExitCode::FAILURE;
            }
        }

        Command::Route { origin, destination } => match routes::get_route_distance(&origin, &destination) {
            Some(km) => println!("  {} \u{2194} {}: {} km", origin, destination, km),
            None => {
                eprintln!("  Rota desconhecida: {} \u{2194} {}", origin, destination);
                return ExitCode::FAILURE;
            }
        },

        Command::Suggest { city } => {
            print!("{}", report::render_suggestions(&city, &routes::suggest_routes(&city)));
        }

        Command::Transports => {
            for t in transport_list() {
                println!("  {:<6} {:<10} {:.3} kg CO2/km", t.id.id(), t.name, t.emission_factor);
            }
        }

        Command::Serve { host, port } => {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Error: cannot start runtime: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = runtime.block_on(server::start(&host, port, store)) {
                eprintln!("Error: cannot serve on {}:{}: {}", host, port, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
