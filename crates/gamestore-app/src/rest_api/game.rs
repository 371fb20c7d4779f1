use crate::{
    error::{ApiError, ApiResult},
    repository_from_request,
    state::AppState,
    validate::Garde,
};
use axum::{
    extract::{FromRequestParts, Path, State},
    response::IntoResponse,
    routing::get,
    Json,
};
use gamestore_dal::{
    dto::{CreateGame, GameDto, UpdateGame},
    game::GameRepository,
};
use http::{header::LOCATION, request::Parts, StatusCode};
use tracing::debug;

repository_from_request!(GameRepository);

/// Game id taken from the path, an id that is not a number cannot name a game.
pub struct GameId(pub i64);

impl<S> FromRequestParts<S> for GameId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;
        raw.parse::<i64>()
            .map(GameId)
            .map_err(|_| ApiError::NotFound(format!("Game with ID {raw} not found.")))
    }
}

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(list, get_game, create, update, delete))]
struct ModuleDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ModuleDocs::openapi()
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Game", operation_id = "listGame",
    responses((status = StatusCode::OK, description = "List all games", body = Vec<GameDto>))))]
pub async fn list(repository: GameRepository) -> ApiResult<impl IntoResponse> {
    let games = repository
        .list()
        .await?
        .into_iter()
        .map(GameDto::from)
        .collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(games)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = "Game", operation_id = "getGame",
    responses((status = StatusCode::OK, description = "Get one game", body = GameDto),
    (status = StatusCode::NOT_FOUND, description = "No such game", body = crate::error::ErrorMessage))))]
pub async fn get_game(
    GameId(id): GameId,
    repository: GameRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(id).await?;

    Ok((StatusCode::OK, Json(GameDto::from(record))))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Game", operation_id = "createGame",
    request_body = CreateGame,
    responses((status = StatusCode::CREATED, description = "Created game", body = GameDto),
    (status = StatusCode::BAD_REQUEST, description = "Invalid genre or input", body = crate::error::ErrorMessage))))]
pub async fn create(
    repository: GameRepository,
    State(state): State<AppState>,
    Garde(Json(payload)): Garde<Json<CreateGame>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(payload).await?;
    let location = state.build_url(&format!("games/{}", record.game.id))?;
    debug!("New game at {location}");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location.to_string())],
        Json(GameDto::from(record)),
    ))
}

#[cfg_attr(feature = "openapi",  utoipa::path(put, path = "/{id}", tag = "Game", operation_id = "updateGame",
    request_body = UpdateGame,
    responses((status = StatusCode::NO_CONTENT, description = "Updated game"),
    (status = StatusCode::NOT_FOUND, description = "No such game", body = crate::error::ErrorMessage),
    (status = StatusCode::BAD_REQUEST, description = "Invalid genre or input", body = crate::error::ErrorMessage))))]
pub async fn update(
    GameId(id): GameId,
    repository: GameRepository,
    Garde(Json(payload)): Garde<Json<UpdateGame>>,
) -> ApiResult<impl IntoResponse> {
    repository.update(id, payload).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Game", operation_id = "deleteGame",
    responses((status = StatusCode::NO_CONTENT, description = "Deleted game"),
    (status = StatusCode::NOT_FOUND, description = "No such game", body = crate::error::ErrorMessage))))]
pub async fn delete(
    GameId(id): GameId,
    repository: GameRepository,
) -> ApiResult<impl IntoResponse> {
    repository.delete(id).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_game).put(update).delete(delete))
}
