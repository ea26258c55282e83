//! The UI controller: runs a form submission or a history clear from start to
//! finish against an injected [`Presenter`].

use crate::calculator::{self, Statistics, TransportComparison};
use crate::error::TripError;
use crate::planner::{self, TripForm, TripReport};
use crate::transport::TransportMode;
use crate::trips::{TripBook, TripHistory, TripStore};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// The display surface the controller drives.
pub trait Presenter {
    /// Blocking error notification.
    fn show_error(&mut self, message: &str);
    /// Transient success notification.
    fn show_success(&mut self, message: &str);
    /// Yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
    fn render_result(&mut self, report: &TripReport);
    fn render_history(&mut self, history: &TripHistory);
}

pub struct Controller<S: TripStore, P: Presenter> {
    book: TripBook<S>,
    presenter: P,
}

impl<S: TripStore, P: Presenter> Controller<S, P> {
    /// Load the history from `store`.
    pub fn new(store: S, presenter: P) -> Self {
        Self {
            book: TripBook::open(store),
            presenter,
        }
    }

    pub fn history(&self) -> &TripHistory {
        self.book.history()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn show_history(&mut self) {
        self.presenter.render_history(self.book.history());
    }

    pub fn submit(&mut self, form: &TripForm) -> Result<TripReport, TripError> {
        self.submit_at(form, Utc::now())
    }

    /// Calculate, record and display one trip. On any error the history is
    /// left as it was and the error is shown.
    pub fn submit_at(&mut self, form: &TripForm, now: DateTime<Utc>) -> Result<TripReport, TripError> {
        match self.try_submit(form, now) {
            Ok(report) => {
                self.presenter.render_result(&report);
                self.presenter.show_success("Cálculo realizado com sucesso!");
                Ok(report)
            }
            Err(e) => {
                log::debug!("submission rejected: {}", e);
                self.presenter.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    fn try_submit(&mut self, form: &TripForm, now: DateTime<Utc>) -> Result<TripReport, TripError> {
        let mut plan = planner::plan_trip(form)?;

        if let Some(suggestion) = &plan.suggestion {
            if self.presenter.confirm(&suggestion.prompt()) {
                plan.use_suggested_distance();
            }
        }

        let report = plan.into_report(now);
        self.book.record(report.trip.clone())?;
        Ok(report)
    }

    /// Clear the history after confirmation. Returns whether it was cleared.
    pub fn clear_history(&mut self) -> Result<bool, TripError> {
        if self.book.history().is_empty() {
            let e = TripError::EmptyHistory;
            self.presenter.show_error(&e.to_string());
            return Err(e);
        }

        if !self.presenter.confirm("Tem certeza que deseja limpar todo o histórico?") {
            return Ok(false);
        }

        if let Err(e) = self.book.clear() {
            let e = TripError::from(e);
            self.presenter.show_error(&e.to_string());
            return Err(e);
        }
        self.presenter.render_history(self.book.history());
        self.presenter.show_success("Histórico limpo com sucesso!");
        Ok(true)
    }

    pub fn statistics(&self) -> Option<Statistics> {
        calculator::calculate_statistics(self.book.history().trips())
    }

    /// Every transport mode for the same trip, from raw distance and
    /// passenger text. Invalid input is shown as an error.
    pub fn compare(
        &mut self,
        distance: &str,
        passengers: &str,
    ) -> Result<BTreeMap<TransportMode, TransportComparison>, TripError> {
        let parsed = planner::parse_distance(distance)
            .and_then(|d| planner::parse_passengers(passengers).map(|p| (d, p)));
        match parsed {
            Ok((distance, passengers)) => Ok(calculator::compare_transports(distance, passengers)),
            Err(e) => {
                self.presenter.show_error(&e.to_string());
                Err(e)
            }
        }
    }
}
