//! Shapes crossing the HTTP boundary. Entities never serialize directly.

use garde::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{convert::price_limit, game::GameWithGenre};

/// Genre name reported when a game's genre could not be resolved.
pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GameDto {
    pub id: i64,
    pub name: String,
    pub genre_name: String,
    pub price: Decimal,
    pub release_date: Date,
}

impl From<GameWithGenre> for GameDto {
    fn from(value: GameWithGenre) -> Self {
        let GameWithGenre { game, genre } = value;
        GameDto {
            id: game.id,
            name: game.name,
            genre_name: genre
                .map(|g| g.name)
                .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
            price: game.price,
            release_date: game.release_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateGame {
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    #[garde(skip)]
    pub genre_id: i64,
    #[garde(custom(valid_price))]
    pub price: Decimal,
    #[garde(skip)]
    pub release_date: Date,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateGame {
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    #[garde(skip)]
    pub genre_id: i64,
    #[garde(custom(valid_price))]
    pub price: Decimal,
    #[garde(skip)]
    pub release_date: Date,
}

fn valid_price(value: &Decimal, _ctx: &()) -> garde::Result {
    if *value < Decimal::ZERO {
        Err(garde::Error::new("price must not be negative"))
    } else if *value >= price_limit() {
        Err(garde::Error::new(format!(
            "price must be lower than {}",
            price_limit()
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game::Game, genre::Genre};
    use time::macros::date;

    fn game_with_genre(genre: Option<Genre>) -> GameWithGenre {
        GameWithGenre {
            game: Game {
                id: 7,
                name: "Game X".into(),
                genre_id: 3,
                price: Decimal::new(1999, 2),
                release_date: date!(2024 - 01 - 05),
            },
            genre,
        }
    }

    fn create_game(name: &str, price: Decimal) -> CreateGame {
        CreateGame {
            name: name.into(),
            genre_id: 1,
            price,
            release_date: date!(2022 - 10 - 01),
        }
    }

    #[test]
    fn test_dto_flattens_genre() {
        let dto: GameDto = game_with_genre(Some(Genre {
            id: 3,
            name: "RPG".into(),
        }))
        .into();
        assert_eq!(dto.id, 7);
        assert_eq!(dto.genre_name, "RPG");
        assert_eq!(dto.price, Decimal::new(1999, 2));
    }

    #[test]
    fn test_dto_unknown_genre() {
        let dto: GameDto = game_with_genre(None).into();
        assert_eq!(dto.genre_name, UNKNOWN_GENRE);
    }

    #[test]
    fn test_dto_json_shape() {
        let dto: GameDto = game_with_genre(None).into();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["genreName"], "Unknown");
        assert_eq!(json["releaseDate"], "2024-01-05");
        assert_eq!(json["price"].to_string(), "19.99");
        assert!(json.get("genre_id").is_none());
    }

    #[test]
    fn test_create_game_from_json() {
        let payload: CreateGame = serde_json::from_value(serde_json::json!({
            "name": "Game F",
            "genreId": 2,
            "price": 9.99,
            "releaseDate": "2025-02-12"
        }))
        .unwrap();
        assert_eq!(payload.genre_id, 2);
        assert_eq!(payload.price, Decimal::new(999, 2));
        assert_eq!(payload.release_date, date!(2025 - 02 - 12));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_price_keeps_all_digits() {
        let raw = r#"{"name":"Game F","genreId":2,"price":9999999999999999.99,"releaseDate":"2025-02-12"}"#;
        let payload: CreateGame = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.price, Decimal::new(999_999_999_999_999_999, 2));
        assert!(payload.validate().is_ok());

        let raw = r#"{"name":"Game F","genreId":2,"price":1234567890123456.78,"releaseDate":"2025-02-12"}"#;
        let payload: CreateGame = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.price, Decimal::new(123_456_789_012_345_678, 2));

        let mut record = game_with_genre(None);
        record.game.price = payload.price;
        let text = serde_json::to_string(&GameDto::from(record)).unwrap();
        assert!(text.contains(r#""price":1234567890123456.78"#));
    }

    #[test]
    fn test_create_game_missing_field() {
        let res = serde_json::from_value::<CreateGame>(serde_json::json!({
            "name": "Game F",
            "price": 9.99,
            "releaseDate": "2025-02-12"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(create_game("A", Decimal::ZERO).validate().is_ok());
        assert!(create_game(&"x".repeat(100), Decimal::ZERO).validate().is_ok());
        assert!(create_game("", Decimal::ONE).validate().is_err());
        assert!(create_game(&"x".repeat(101), Decimal::ONE).validate().is_err());
        assert!(create_game("A", Decimal::new(-1, 2)).validate().is_err());
        assert!(create_game("A", price_limit()).validate().is_err());

        let report = create_game("", Decimal::NEGATIVE_ONE).validate().unwrap_err();
        assert_eq!(report.iter().count(), 2);
    }

    #[test]
    fn test_update_validation() {
        let update = UpdateGame {
            name: "ž".repeat(100),
            genre_id: 99,
            price: Decimal::new(4999, 2),
            release_date: date!(2021 - 08 - 15),
        };
        assert!(update.validate().is_ok());
    }
}
