use crate::display::DisplayState;
use crate::errors::AppError;
use crate::models::{CheckinRequest, CheckinResponse};
use crate::pipeline::refresh;
use crate::state::AppState;
use crate::submit::{submit_checkin, SUCCESS_MESSAGE};
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let display = refresh(&state)
        .await
        .unwrap_or_else(|_| DisplayState::unavailable());
    Html(render_index(&display))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DisplayState>, AppError> {
    Ok(Json(refresh(&state).await?))
}

pub async fn checkin(
    State(state): State<AppState>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<CheckinResponse>, AppError> {
    submit_checkin(&state.store, &state.submits, payload).await?;

    let today = refresh(&state)
        .await
        .unwrap_or_else(|_| DisplayState::unavailable());

    Ok(Json(CheckinResponse {
        result: "success",
        message: SUCCESS_MESSAGE.to_string(),
        today,
    }))
}

pub async fn checkin_form(
    State(state): State<AppState>,
    Form(payload): Form<CheckinRequest>,
) -> Result<Redirect, AppError> {
    submit_checkin(&state.store, &state.submits, payload).await?;
    Ok(Redirect::to("/"))
}
