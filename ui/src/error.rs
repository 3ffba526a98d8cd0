use payloads::ClientError;

/// Fallback messages shown when the API gives no detail of its own.
pub mod messages {
    pub const ERROR_TITLE: &str = "Erro";
    pub const SUCCESS_TITLE: &str = "Sucesso";

    pub const PROPERTY_LOAD: &str =
        "Erro ao carregar informações da propriedade";
    pub const SEARCH: &str = "Erro ao buscar disponibilidade";
    pub const INVALID_SEARCH: &str = "Critérios de busca inválidos";
    pub const BOOKING: &str = "Erro ao criar reserva";
    pub const MAP_LOAD: &str = "Erro ao carregar o mapa de quartos";
    pub const BULK_OPERATION: &str = "Erro ao executar operação em lote";
    pub const QUICK_BOOKING: &str = "Erro ao criar reserva rápida";
    pub const ROOM_TYPES_LOAD: &str = "Erro ao carregar tipos de quarto";
    pub const TOGGLE_BOOKABLE: &str =
        "Erro ao alterar disponibilidade do tipo de quarto";
    pub const DELETE_ROOM_TYPE: &str = "Erro ao excluir tipo de quarto";
}

/// Failure of an orchestration operation. `Display` is the message shown
/// to the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ClientError,
    },
}

impl Error {
    pub fn from_client(source: ClientError, fallback: &str) -> Self {
        Self::Api {
            message: display_message(&source, fallback),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Api { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

/// The server's detail message if it sent one, otherwise the fallback.
pub fn display_message(err: &ClientError, fallback: &str) -> String {
    err.detail().unwrap_or(fallback).to_string()
}
