#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::shared::constants::ROLE_ADMIN;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_collector_user(account_id: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: account_id.to_string(),
        sub: format!("sub-{}", account_id),
        roles: vec![],
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: "test-admin-id".to_string(),
        sub: "test-admin-sub".to_string(),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

/// Wrap a router so every request arrives as `user`, bypassing token validation
#[cfg(test)]
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    with_user(router, create_admin_user())
}
