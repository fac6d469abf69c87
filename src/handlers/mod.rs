pub mod health;
pub mod users;

pub use health::{health_check, readiness_check};
pub use users::{
    check_user, clear_users, get_user_information, list_users, save_or_update_user_information,
    save_user_information, update_user_field, update_user_information, update_user_pin,
};
