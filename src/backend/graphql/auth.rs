//! Authentication schema and resolvers

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult};
use sqlx::SqlitePool;

use crate::backend::auth::{self, LoginRequest, SessionKeys, SignupRequest};
use crate::backend::graphql::{viewer, types::GqlUser, PasswordCost};
use crate::shared::User;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The caller, or null without a valid session
    async fn me(&self, ctx: &Context<'_>) -> Option<GqlUser> {
        viewer(ctx).map(|user| {
            GqlUser::from(User {
                id: user.user_id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
            })
        })
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Exchange credentials for a session token
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> GraphQLResult<String> {
        let pool = ctx.data::<SqlitePool>()?;
        let keys = ctx.data::<SessionKeys>()?;

        let payload = auth::login(pool, keys, LoginRequest { email, password })
            .await
            .map_err(|e| e.extend())?;
        Ok(payload.token)
    }

    /// Register and return a session token
    async fn signup(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        password: String,
    ) -> GraphQLResult<String> {
        let pool = ctx.data::<SqlitePool>()?;
        let keys = ctx.data::<SessionKeys>()?;
        let cost = ctx.data::<PasswordCost>()?;

        let request = SignupRequest {
            name,
            email,
            password,
        };
        let payload = auth::signup(pool, keys, cost.0, request)
            .await
            .map_err(|e| e.extend())?;
        Ok(payload.token)
    }
}
