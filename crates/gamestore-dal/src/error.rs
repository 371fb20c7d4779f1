use rust_decimal::Decimal;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} with ID {id} not found.")]
    RecordNotFound { entity: &'static str, id: i64 },

    #[error("{entity} with ID {id} does not exist.")]
    InvalidReference { entity: &'static str, id: i64 },

    #[error("Price {0} cannot be stored")]
    PriceOutOfRange(Decimal),
}
