pub mod auth;

pub use auth::{
    AuthError, AuthenticatedUser, IdentityResolver, PgSessionResolver, require_user_from_headers,
};
