use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Import could not run
    #[error("Import error: {0}")]
    Import(String),

    /// Report files could not be written
    #[error("Report error: {0}")]
    Report(String),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),

    /// Some products failed and `--fail-on-error` was given
    #[error("{0} product(s) failed to import")]
    ImportFailures(usize),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    pub(crate) fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
