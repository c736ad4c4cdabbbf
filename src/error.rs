#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid username or password")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient data: {have} entries, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("Not enough data: {have} entries, need at least {need}")]
    NotEnoughData { have: usize, need: usize },

    #[error("Store corruption: {0}")]
    StoreCorruption(String),

    #[error("Input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Text shown to the user at the shell boundary. Store and internal
    /// failures are logged here and replaced by a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized => "Invalid username or password.".into(),
            AppError::NotFound(msg) => format!("❌ {msg}"),
            AppError::Validation(msg) => format!("❌ {msg}"),
            AppError::Conflict(msg) => format!("❌ Error: {msg}"),
            AppError::InsufficientData { need, .. } => format!(
                "⚠️ Cannot run prediction. Need at least {need} historical entries to train the model."
            ),
            AppError::NotEnoughData { need, .. } => {
                format!("Not enough data (need at least {need} entries) for visualization.")
            }
            AppError::StoreCorruption(msg) => {
                tracing::error!(detail = %msg, "Corrupt record in store");
                "❌ Your journal contains a damaged record and could not be read.".into()
            }
            AppError::InputClosed => "Input closed.".into(),
            AppError::Io(e) => {
                tracing::error!(error = %e, "Terminal I/O error");
                "❌ Internal error.".into()
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "❌ Internal storage error.".into()
            }
            AppError::Migration(e) => {
                tracing::error!(error = %e, "Migration error");
                "❌ Internal storage error.".into()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                "❌ Internal error.".into()
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message_names_minimum() {
        let err = AppError::InsufficientData { have: 3, need: 15 };
        assert!(err.user_message().contains("at least 15"));
    }

    #[test]
    fn test_not_enough_data_message_names_minimum() {
        let err = AppError::NotEnoughData { have: 1, need: 2 };
        assert_eq!(
            err.user_message(),
            "Not enough data (need at least 2 entries) for visualization."
        );
    }

    #[test]
    fn test_database_error_is_not_leaked() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.user_message(), "❌ Internal storage error.");
    }
}
