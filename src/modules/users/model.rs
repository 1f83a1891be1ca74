pub use tollgate_models::ids::UserId;
pub use tollgate_models::users::{User, UserCreate, UserProfile};
