pub mod models;

pub use models::identity::Identity;
pub use models::user::User;
