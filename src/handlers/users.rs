//! One store round trip per route; outcome maps straight to a status code.

use crate::dtos::{
    CheckUserResponse, SaveOrUpdateUserRequest, SuccessResponse, UpdateFieldRequest,
    UpdatePinRequest,
};
use crate::error::AppError;
use crate::models::{FieldUpdate, UserUpdate};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::UpdateOptions;
use serde_json::{Map, Value};

/// `GET /getUserInformation` — every record, 404 when the collection is empty.
pub async fn get_user_information(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut cursor = state.db.users().find(doc! {}, None).await?;

    let mut users: Vec<Document> = Vec::new();
    while let Some(user) = cursor.try_next().await? {
        users.push(user);
    }

    if users.is_empty() {
        return Err(AppError::NotFound(anyhow::anyhow!("No users found")));
    }

    Ok(Json(users))
}

/// `GET /listUsers` — every record, empty array is a normal answer.
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut cursor = state.db.users().find(doc! {}, None).await?;

    let mut users: Vec<Document> = Vec::new();
    while let Some(user) = cursor.try_next().await? {
        users.push(user);
    }

    Ok(Json(users))
}

/// `GET /checkUser/:userAlias`
pub async fn check_user(
    State(state): State<AppState>,
    Path(user_alias): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .db
        .users()
        .find_one(doc! { "userAlias": &user_alias }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;

    Ok(Json(CheckUserResponse {
        success: true,
        user,
    }))
}

/// `POST /saveUserInformation` — upserts the singleton profile through the
/// empty filter, so the collection's global document holds the last write.
pub async fn save_user_information(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let update = UserUpdate::from_fields(&body)?.into_document();

    state
        .db
        .users()
        .update_one(
            doc! {},
            update,
            UpdateOptions::builder().upsert(true).build(),
        )
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// `PATCH /updateUserField` — sets one named field on the singleton profile.
pub async fn update_user_field(
    State(state): State<AppState>,
    Json(body): Json<UpdateFieldRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut update = UserUpdate::default();
    update.set_field(&body.field_name, &body.field_value)?;

    state
        .db
        .users()
        .update_one(doc! {}, update.into_document(), None)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// `PATCH /updateUserPin`
pub async fn update_user_pin(
    State(state): State<AppState>,
    Json(body): Json<UpdatePinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut update = UserUpdate::default();
    update.set_field("pin", &body.pin)?;

    state
        .db
        .users()
        .update_one(doc! {}, update.into_document(), None)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// `PATCH /updateUserInformation/:userAlias` — shallow-merges the body into
/// the matched record; an unknown alias matches nothing and still answers 200.
pub async fn update_user_information(
    State(state): State<AppState>,
    Path(user_alias): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let update = UserUpdate::from_fields(&body)?.into_document();

    state
        .db
        .users()
        .update_one(doc! { "userAlias": &user_alias }, update, None)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// `PATCH /saveOrUpdateUserInformation/:userAlias` — alias-keyed upsert.
///
/// A null or absent `contractPicture` removes the stored field; a present
/// one overwrites it. The alias lands on inserted documents through the
/// equality filter.
pub async fn save_or_update_user_information(
    State(state): State<AppState>,
    Path(user_alias): Path<String>,
    Json(body): Json<SaveOrUpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut update = UserUpdate::from_fields(&body.fields)?;
    if let Some(pin) = &body.pin {
        update.set_field("pin", pin)?;
    }
    update.apply(
        "contractPicture",
        FieldUpdate::from_nullable(body.contract_picture)?,
    );

    state
        .db
        .users()
        .update_one(
            doc! { "userAlias": &user_alias },
            update.into_document(),
            UpdateOptions::builder().upsert(true).build(),
        )
        .await?;

    tracing::info!(user_alias = %user_alias, "Saved user information");

    Ok(Json(SuccessResponse::ok()))
}

/// `DELETE /clearUsers` — drops every record in the collection.
pub async fn clear_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let result = state.db.users().delete_many(doc! {}, None).await?;
    tracing::info!(deleted = result.deleted_count, "Cleared users collection");

    Ok(Json(SuccessResponse::ok()))
}
