use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckUserResponse {
    pub success: bool,
    pub user: Document,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    pub field_name: String,
    pub field_value: Value,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePinRequest {
    // Defaults to JSON null so a pin-less body stores null instead of
    // failing extraction; this service performs no input validation.
    #[serde(default)]
    pub pin: Value,
}

/// Body of `PATCH /saveOrUpdateUserInformation/:userAlias`.
///
/// `pin` and `contractPicture` get dedicated handling; every other
/// top-level field lands in `fields` untouched, whatever its shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrUpdateUserRequest {
    #[serde(default)]
    pub pin: Option<Value>,
    #[serde(default)]
    pub contract_picture: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
