//! MoaDocs Error Types
//!
//! 애플리케이션 전역 에러 타입 정의

use serde::Serialize;
use thiserror::Error;

/// MoaDocs 애플리케이션 에러
#[derive(Error, Debug)]
pub enum MoaError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Invalid data file: {0}")]
    InvalidDataFile(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Tauri 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<MoaError> for CommandError {
    fn from(error: MoaError) -> Self {
        let code = match &error {
            MoaError::Database(_) => "DB_ERROR",
            MoaError::Io(_) => "IO_ERROR",
            MoaError::Serialization(_) => "SERIALIZATION_ERROR",
            MoaError::ClientNotFound(_) => "CLIENT_NOT_FOUND",
            MoaError::Workbook(_) => "WORKBOOK_ERROR",
            MoaError::InvalidDataFile(_) => "INVALID_DATA_FILE",
            MoaError::InvalidOperation(_) => "INVALID_OPERATION",
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

/// Tauri 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;
