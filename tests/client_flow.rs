//! Client library end-to-end tests
//!
//! Drives a spawned server only through `eventure::client`, the way an app
//! screen would: log in, list events, open one, watch its participants.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;

use common::*;
use eventure::client::{ClientError, GraphQLClient, PresenceView, RealtimeClient};
use eventure::shared::ServerMessage;

const WAIT: Duration = Duration::from_secs(5);

/// Feed frames into the view until `done` holds
async fn pump_until(
    socket: &mut RealtimeClient,
    view: &mut PresenceView,
    done: impl Fn(&PresenceView) -> bool,
) {
    while !done(view) {
        let message = socket
            .recv_timeout(WAIT)
            .await
            .expect("Receive failed")
            .expect("Timed out waiting for a frame");
        view.apply(&message);
    }
}

async fn open_screen(
    socket: &mut RealtimeClient,
    view: &mut PresenceView,
    event_id: &str,
) {
    for frame in view.navigate_to(event_id) {
        socket.send(&frame).await.expect("Send failed");
    }
}

#[tokio::test]
async fn test_browse_login_and_join() {
    let server = TestServer::seeded().await;
    let mut api = GraphQLClient::new(&server.client_config());

    assert_eq!(api.me().await.unwrap(), None);

    let events = api.events().await.unwrap();
    assert_eq!(events.len(), 3);
    assert_sorted_by_start(&events);

    let err = api.join_event(&events[2].id).await.unwrap_err();
    assert_eq!(err.code(), Some("UNAUTHENTICATED"));

    api.login("alice@example.com", SEED_PASSWORD).await.unwrap();
    let me = api.me().await.unwrap().expect("logged in");
    assert_eq!(me.id, "user1");

    let joined = api.join_event(&events[2].id).await.unwrap();
    assert_eq!(joined.name, "GraphQL Deep Dive");
    assert!(joined.has_attendee("user1"));

    let again = api.join_event(&events[2].id).await.unwrap();
    assert_eq!(again, joined);

    let fetched = api.event(&events[2].id).await.unwrap();
    assert_eq!(fetched.attendees, joined.attendees);
}

#[tokio::test]
async fn test_client_errors_carry_codes() {
    let server = TestServer::seeded().await;
    let mut api = GraphQLClient::new(&server.client_config());

    let err = api.login("alice@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.code(), Some("INVALID_CREDENTIALS"));
    assert_eq!(api.token(), None);

    let err = api.event("no-such-event").await.unwrap_err();
    assert!(matches!(err, ClientError::GraphQL { ref code, .. } if code == "NOT_FOUND"));
}

#[tokio::test]
async fn test_presence_view_follows_navigation() {
    let server = TestServer::seeded().await;
    let api = GraphQLClient::new(&server.client_config());
    let events = api.events().await.unwrap();
    let (first, second) = (&events[0].id, &events[1].id);

    let mut alice_socket = RealtimeClient::connect(&server.client_config()).await.unwrap();
    let mut alice = PresenceView::new(Some("Alice".to_string()));
    let mut bob_socket = RealtimeClient::connect(&server.client_config()).await.unwrap();
    let mut bob = PresenceView::new(Some("Bob".to_string()));

    open_screen(&mut alice_socket, &mut alice, first).await;
    pump_until(&mut alice_socket, &mut alice, |v| v.participants().len() == 1).await;
    assert_eq!(alice.render(), "Live Participants:\n  Alice");

    open_screen(&mut bob_socket, &mut bob, first).await;
    pump_until(&mut bob_socket, &mut bob, |v| v.participants().len() == 2).await;
    pump_until(&mut alice_socket, &mut alice, |v| v.participants().len() == 2).await;
    assert_same_names(alice.participants(), &["Alice", "Bob"]);

    // Bob moves on: Alice's room shrinks, Bob only sees the new room
    open_screen(&mut bob_socket, &mut bob, second).await;
    pump_until(&mut alice_socket, &mut alice, |v| v.participants().len() == 1).await;
    pump_until(&mut bob_socket, &mut bob, |v| !v.participants().is_empty()).await;
    assert_eq!(alice.participants(), ["Alice"]);
    assert_eq!(bob.participants(), ["Bob"]);

    assert!(bob.navigate_back().len() == 1);
    assert_eq!(bob.render(), "Live Participants:");
}

#[tokio::test]
async fn test_presence_view_receives_attendee_updates() {
    let server = TestServer::seeded().await;
    let mut api = GraphQLClient::new(&server.client_config());
    api.login("bob@example.com", SEED_PASSWORD).await.unwrap();
    let event = server.db.event_named("GraphQL Deep Dive").await;

    let mut socket = RealtimeClient::connect(&server.client_config()).await.unwrap();
    let mut view = PresenceView::new(Some("Bob".to_string()));
    open_screen(&mut socket, &mut view, &event.id).await;
    pump_until(&mut socket, &mut view, |v| !v.participants().is_empty()).await;

    api.join_event(&event.id).await.unwrap();
    pump_until(&mut socket, &mut view, |v| !v.attendees().is_empty()).await;
    assert_eq!(view.attendees()[0].name, "Bob");

    socket.ping().await.unwrap();
    let pong = socket.recv_timeout(WAIT).await.unwrap();
    assert_eq!(pong, Some(ServerMessage::Pong));
    socket.close().await.unwrap();
}
