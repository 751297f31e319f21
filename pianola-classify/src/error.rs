/// Errors that can occur during the classification stage.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table error: {0}")]
    Table(#[from] pianola_core::TableError),
}
