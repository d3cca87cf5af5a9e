//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `OptimizeError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (directory non leggibili, permessi, etc.)
//! - `Codec`: Un codec esterno è fallito per una famiglia di formati
//! - `MissingTools`: Nessun tool esterno disponibile per una famiglia
//! - `Validation`: Errori di validazione della configurazione
//!
//! ## Propagazione:
//! - Errori fatali (setup) risalgono fino a `main` tramite `anyhow`
//! - Errori per-famiglia vengono catturati al punto di join del fan-out

/// Custom error types for image optimization
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{format} codec error: {reason}")]
    Codec {
        format: &'static str,
        reason: String,
    },

    #[error("No {format} codec available. Please install one of: {candidates}")]
    MissingTools {
        format: &'static str,
        candidates: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}
