//! Errors surfaced to the person filling in a trip.

use crate::trips::StoreError;

/// Messages are shown verbatim in notifications, hence pt-BR.
#[derive(thiserror::Error, Debug)]
pub enum TripError {
    #[error("Por favor, preencha origem e destino")]
    MissingEndpoints,
    #[error("Por favor, selecione um meio de transporte")]
    MissingTransport,
    #[error("A distância deve ser maior que zero")]
    InvalidDistance,
    #[error("O número de passageiros deve ser maior que zero")]
    InvalidPassengers,
    #[error("Meio de transporte inválido: '{0}'")]
    InvalidTransport(String),
    #[error("Não há histórico para limpar")]
    EmptyHistory,
    #[error("Falha ao salvar o histórico: {0}")]
    Storage(#[from] StoreError),
}

impl TripError {
    /// Input errors (as opposed to storage or state errors).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingEndpoints
                | Self::MissingTransport
                | Self::InvalidDistance
                | Self::InvalidPassengers
                | Self::InvalidTransport(_)
        )
    }
}
