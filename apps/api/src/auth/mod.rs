// Email/password accounts with short-lived bearer tokens.
// Sign-out revokes the presented token by id until it would have expired.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod sessions;
pub mod tokens;

pub use extractor::{AuthUser, MaybeAuthUser};
