use anyhow::{Result, anyhow};
use gamestore_dal::dto::GameDto;
use reqwest::{StatusCode, Url};
use serde_json::json;
use tracing::info;

pub fn games_url(base_url: &Url) -> Url {
    base_url.join("games").unwrap()
}

pub async fn create_game(
    client: &reqwest::Client,
    base_url: &Url,
    name: &str,
    genre_id: i64,
    price: f64,
    release_date: &str,
) -> Result<(GameDto, Url)> {
    let payload = json!({
        "name": name,
        "genreId": genre_id,
        "price": price,
        "releaseDate": release_date,
    });

    let response = client
        .post(games_url(base_url))
        .json(&payload)
        .send()
        .await?;
    info!("Response: {:#?}", response);
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .ok_or_else(|| anyhow!("Missing Location header"))?
        .to_str()?
        .parse()?;

    let new_game: GameDto = response.json().await?;
    Ok((new_game, location))
}

pub async fn list_games(client: &reqwest::Client, base_url: &Url) -> Result<Vec<GameDto>> {
    let response = client.get(games_url(base_url)).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let games: Vec<GameDto> = response.json().await?;
    Ok(games)
}
