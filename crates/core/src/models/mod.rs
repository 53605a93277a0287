//! Record types mapped to schema-qualified tables.
//!
//! - [`User`] lives in `auth.user`
//! - [`Order`] lives in `app.order` and points at its owner through `user_id`

pub mod order;
pub mod user;

pub use order::{Order, OrderWithUser, attach_users};
pub use user::User;
