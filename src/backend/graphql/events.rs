//! Event queries and mutations

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, ID};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::events::{self, db, NewEvent};
use crate::backend::graphql::{viewer, types::GqlEvent};
use crate::backend::realtime::{MembershipFeed, RoomRegistry};

#[derive(Default)]
pub struct EventQuery;

#[Object]
impl EventQuery {
    /// All events, earliest start time first
    async fn events(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<GqlEvent>> {
        let pool = ctx.data::<SqlitePool>()?;
        let events = db::list_events(pool)
            .await
            .map_err(|e| BackendError::from(e).extend())?;
        Ok(events.into_iter().map(GqlEvent::from).collect())
    }

    /// A single event; NOT_FOUND if it does not exist
    async fn event(&self, ctx: &Context<'_>, id: ID) -> GraphQLResult<Option<GqlEvent>> {
        let pool = ctx.data::<SqlitePool>()?;
        let event = db::get_event(pool, id.as_str())
            .await
            .map_err(|e| BackendError::from(e).extend())?
            .ok_or_else(|| BackendError::not_found("Event", id.as_str()).extend())?;
        Ok(Some(GqlEvent::from(event)))
    }
}

#[derive(Default)]
pub struct EventMutation;

#[Object]
impl EventMutation {
    /// Add the caller to an event's attendees; requires a session
    async fn join_event(&self, ctx: &Context<'_>, event_id: ID) -> GraphQLResult<GqlEvent> {
        let pool = ctx.data::<SqlitePool>()?;
        let rooms = ctx.data::<RoomRegistry>()?;
        let feed = ctx.data::<MembershipFeed>()?;

        let event = events::join_event(pool, rooms, feed, viewer(ctx), event_id.as_str())
            .await
            .map_err(|e| e.extend())?;
        Ok(GqlEvent::from(event))
    }

    /// Publish a new event; requires a session
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        name: String,
        location: String,
        start_time: DateTime<Utc>,
    ) -> GraphQLResult<GqlEvent> {
        let pool = ctx.data::<SqlitePool>()?;
        let rooms = ctx.data::<RoomRegistry>()?;

        let input = NewEvent {
            name,
            location,
            start_time,
        };
        let event = events::create_event(pool, rooms, viewer(ctx), input)
            .await
            .map_err(|e| e.extend())?;
        Ok(GqlEvent::from(event))
    }
}
