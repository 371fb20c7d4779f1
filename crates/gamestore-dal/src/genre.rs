use crate::error::{Error, Result};
use sqlx::Pool;

pub const ENTITY: &str = "Genre";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

pub type GenreRepository = GenreRepositoryImpl<Pool<crate::ChosenDB>>;

/// Genres are read only, they are maintained by migrations.
pub struct GenreRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> GenreRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn get(&self, id: i64) -> Result<Genre> {
        find(id, &self.executor)
            .await?
            .ok_or(Error::RecordNotFound { entity: ENTITY, id })
    }
}

pub(crate) async fn find<'c, E>(id: i64, executor: E) -> Result<Option<Genre>>
where
    E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    let record = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(record)
}

/// Fails with `InvalidReference` when no genre with `id` exists.
pub(crate) async fn ensure_exists<'c, E>(id: i64, executor: E) -> Result<Genre>
where
    E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    find(id, executor)
        .await?
        .ok_or(Error::InvalidReference { entity: ENTITY, id })
}
