use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role_auth::RequireRole;
use crate::models::account::UserRole;
use crate::routes::account::role_management::{list_users_with_roles, update_user_role};
use crate::routes::rate_settings::update_rate_settings;

pub fn config(cfg: &mut web::ServiceConfig) {
    // Middleware runs in reverse registration order: AuthMiddleware decodes the
    // token before RequireRole inspects the claims
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::new(UserRole::Admin))
            .wrap(AuthMiddleware)
            .route("/users", web::get().to(list_users_with_roles))
            .route("/users/{id}/role", web::put().to(update_user_role))
            .route("/rates", web::put().to(update_rate_settings)),
    );
}
