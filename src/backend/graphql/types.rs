//! GraphQL object types
//!
//! `User` and `Event` as exposed by the schema. They mirror the shared wire
//! types; `User.events` is resolved lazily from the store.

use async_graphql::{ComplexObject, Context, ErrorExtensions, Result as GraphQLResult, SimpleObject, ID};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::events::db::events_for_user;
use crate::shared::{Event, User};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "User", complex)]
pub struct GqlUser {
    pub id: ID,
    pub name: String,
    pub email: String,
}

#[ComplexObject]
impl GqlUser {
    /// Events this user attends, earliest first
    async fn events(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<GqlEvent>> {
        let pool = ctx.data::<SqlitePool>()?;
        let events = events_for_user(pool, self.id.as_str())
            .await
            .map_err(|e| BackendError::from(e).extend())?;
        Ok(events.into_iter().map(GqlEvent::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Event")]
pub struct GqlEvent {
    pub id: ID,
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    /// Attendees in the order they joined
    pub attendees: Vec<GqlUser>,
}

impl From<User> for GqlUser {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id),
            name: user.name,
            email: user.email,
        }
    }
}

impl From<Event> for GqlEvent {
    fn from(event: Event) -> Self {
        Self {
            id: ID(event.id),
            name: event.name,
            location: event.location,
            start_time: event.start_time,
            attendees: event.attendees.into_iter().map(GqlUser::from).collect(),
        }
    }
}
