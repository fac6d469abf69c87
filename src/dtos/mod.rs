pub mod users;

pub use users::{
    CheckUserResponse, SaveOrUpdateUserRequest, SuccessResponse, UpdateFieldRequest,
    UpdatePinRequest,
};
