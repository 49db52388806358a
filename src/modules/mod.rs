pub mod auth;
pub mod ideas;
pub mod users;

pub use self::ideas::model::Idea;
pub use self::users::model::User;
