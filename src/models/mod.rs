pub mod email;
pub mod password;
pub mod user;

pub use email::Email;
pub use password::Password;
pub use user::{User, UserProjection};
