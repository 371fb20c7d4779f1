use crate::{
    convert::{date_from_storage, date_to_storage, price_from_storage, price_to_storage},
    dto::{CreateGame, UpdateGame},
    error::{Error, Result},
    genre::{self, Genre},
    ChosenRow,
};
use futures::TryStreamExt as _;
use rust_decimal::Decimal;
use sqlx::{Acquire as _, FromRow, Pool, Row as _};
use time::Date;
use tracing::debug;

pub const ENTITY: &str = "Game";

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub genre_id: i64,
    pub price: Decimal,
    pub release_date: Date,
}

impl FromRow<'_, ChosenRow> for Game {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        Ok(Game {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            genre_id: row.try_get("genre_id")?,
            price: price_from_storage(row.try_get("price")?),
            release_date: date_from_storage(row.try_get("release_date")?),
        })
    }
}

/// Game joined with its genre. `genre` is `None` only if the join found no row.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithGenre {
    pub game: Game,
    pub genre: Option<Genre>,
}

impl FromRow<'_, ChosenRow> for GameWithGenre {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        let game = Game::from_row(row)?;
        let genre = row
            .try_get::<Option<String>, _>("genre_name")?
            .map(|name| Genre {
                id: game.genre_id,
                name,
            });
        Ok(GameWithGenre { game, genre })
    }
}

const LIST_SQL: &str = r#"
SELECT g.id, g.name, g.genre_id, g.price, g.release_date, ge.name AS genre_name
FROM games g
LEFT JOIN genres ge ON g.genre_id = ge.id
ORDER BY g.id
"#;

const GET_SQL: &str = r#"
SELECT g.id, g.name, g.genre_id, g.price, g.release_date, ge.name AS genre_name
FROM games g
LEFT JOIN genres ge ON g.genre_id = ge.id
WHERE g.id = ?
"#;

pub type GameRepository = GameRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct GameRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> GameRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>
        + sqlx::Acquire<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<Vec<GameWithGenre>> {
        let records = sqlx::query_as::<_, GameWithGenre>(LIST_SQL)
            .fetch(&self.executor)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    pub async fn get(&self, id: i64) -> Result<GameWithGenre> {
        get(id, &self.executor).await
    }

    pub async fn create(&self, payload: CreateGame) -> Result<GameWithGenre> {
        let price = price_to_storage(payload.price)?;
        let mut conn = self.executor.acquire().await?;
        let mut transaction = conn.begin().await?;

        genre::ensure_exists(payload.genre_id, &mut *transaction).await?;
        let result = sqlx::query(
            "INSERT INTO games (name, genre_id, price, release_date) VALUES (?, ?, ?, ?)",
        )
        .bind(&payload.name)
        .bind(payload.genre_id)
        .bind(price)
        .bind(date_to_storage(payload.release_date))
        .execute(&mut *transaction)
        .await?;

        let id = result.last_insert_rowid();
        let record = get(id, &mut *transaction).await?;
        transaction.commit().await?;
        debug!("Created game {id}");
        Ok(record)
    }

    /// Replaces all mutable fields. A missing game is reported before a missing genre.
    pub async fn update(&self, id: i64, payload: UpdateGame) -> Result<()> {
        let price = price_to_storage(payload.price)?;
        let mut conn = self.executor.acquire().await?;
        let mut transaction = conn.begin().await?;

        if !exists(id, &mut *transaction).await? {
            return Err(Error::RecordNotFound { entity: ENTITY, id });
        }
        genre::ensure_exists(payload.genre_id, &mut *transaction).await?;

        sqlx::query(
            "UPDATE games SET name = ?, genre_id = ?, price = ?, release_date = ? WHERE id = ?",
        )
        .bind(&payload.name)
        .bind(payload.genre_id)
        .bind(price)
        .bind(date_to_storage(payload.release_date))
        .bind(id)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;
        debug!("Updated game {id}");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound { entity: ENTITY, id })
        } else {
            debug!("Deleted game {id}");
            Ok(())
        }
    }
}

async fn get<'c, E>(id: i64, executor: E) -> Result<GameWithGenre>
where
    E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    sqlx::query_as::<_, GameWithGenre>(GET_SQL)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(Error::RecordNotFound { entity: ENTITY, id })
}

async fn exists<'c, E>(id: i64, executor: E) -> Result<bool>
where
    E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM games WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(count > 0)
}
