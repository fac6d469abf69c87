pub mod user;

pub use user::{FieldUpdate, UserUpdate};
