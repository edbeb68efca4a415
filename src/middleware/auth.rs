use axum::http::{HeaderMap, header};
use futures::future::BoxFuture;
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unauthorized: missing authorization header")]
    MissingCredential,
    #[error("Unauthorized: invalid or expired session")]
    InvalidSession,
    #[error("Unauthorized: identity lookup failed: {0}")]
    Backend(String),
}

/// Resolves a caller identity from a bearer credential, or fails.
///
/// The session store behind it belongs to the auth provider; this service
/// only ever reads from it.
pub trait IdentityResolver: Send + Sync {
    fn resolve<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<AuthenticatedUser, AuthError>>;
}

/// Session-table lookup against the auth provider's Postgres schema
#[derive(Clone)]
pub struct PgSessionResolver {
    db: PgPool,
}

impl PgSessionResolver {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl IdentityResolver for PgSessionResolver {
    fn resolve<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<AuthenticatedUser, AuthError>> {
        Box::pin(async move {
            let result = sqlx::query(
                r#"
                SELECT s.user_id
                FROM session s
                JOIN "user" u ON s.user_id = u.id
                WHERE s.token = $1
                  AND s.expires_at > NOW()
                "#,
            )
            .bind(token)
            .fetch_optional(&self.db)
            .await;

            match result {
                Ok(Some(row)) => {
                    use sqlx::Row;
                    Ok(AuthenticatedUser {
                        user_id: row.get("user_id"),
                    })
                }
                Ok(None) => Err(AuthError::InvalidSession),
                Err(e) => Err(AuthError::Backend(e.to_string())),
            }
        })
    }
}

/// Pull the bearer token out of `Authorization` and resolve it.
pub async fn require_user_from_headers(
    resolver: &dyn IdentityResolver,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s).trim());

    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AuthError::MissingCredential),
    };

    resolver.resolve(token).await.inspect_err(|err| {
        tracing::warn!("Rejected credential: {}", err);
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Fixed token → user table
    #[derive(Default)]
    pub struct StaticResolver {
        users: HashMap<String, String>,
    }

    impl StaticResolver {
        pub fn with_user(mut self, token: &str, user_id: &str) -> Self {
            self.users.insert(token.to_string(), user_id.to_string());
            self
        }
    }

    impl IdentityResolver for StaticResolver {
        fn resolve<'a>(
            &'a self,
            token: &'a str,
        ) -> BoxFuture<'a, Result<AuthenticatedUser, AuthError>> {
            let user = self.users.get(token).map(|id| AuthenticatedUser {
                user_id: id.clone(),
            });
            Box::pin(async move { user.ok_or(AuthError::InvalidSession) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StaticResolver;
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn resolves_bearer_token() {
        let resolver = StaticResolver::default().with_user("tok", "user-1");
        let user = require_user_from_headers(&resolver, &headers("Bearer tok"))
            .await
            .unwrap();
        assert_eq!(user.user_id, "user-1");
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let resolver = StaticResolver::default();
        let err = require_user_from_headers(&resolver, &HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[tokio::test]
    async fn empty_bearer_is_rejected() {
        let resolver = StaticResolver::default().with_user("", "nobody");
        let err = require_user_from_headers(&resolver, &headers("Bearer "))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let resolver = StaticResolver::default().with_user("tok", "user-1");
        let err = require_user_from_headers(&resolver, &headers("Bearer other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }
}
