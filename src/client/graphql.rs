/**
 * GraphQL Client
 *
 * Thin async client for the Eventure GraphQL endpoint. `login` and `signup`
 * keep the returned session token and send it as a bearer token on every
 * later request.
 */

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::error::ClientError;
use crate::shared::{ClientConfig, Event, User};

const EVENT_FIELDS: &str = "id name location startTime attendees { id name email }";

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQLErrorBody>,
}

#[derive(Deserialize)]
struct GraphQLErrorBody {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphQLErrorBody {
    fn into_error(self) -> ClientError {
        let code = self
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN")
            .to_string();
        ClientError::GraphQL {
            code,
            message: self.message,
        }
    }
}

/// Client for the GraphQL API
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQLClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.api_url.clone(),
            token: None,
        }
    }

    /// Current session token, if logged in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Use an existing session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Drop the session token
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Log in and keep the returned token
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ClientError> {
        let token: String = self
            .execute(
                "mutation Login($email: String!, $password: String!) { login(email: $email, password: $password) }",
                json!({ "email": email, "password": password }),
                "login",
            )
            .await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Create an account and keep the returned token
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let token: String = self
            .execute(
                "mutation Signup($name: String!, $email: String!, $password: String!) { signup(name: $name, email: $email, password: $password) }",
                json!({ "name": name, "email": email, "password": password }),
                "signup",
            )
            .await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// The logged-in user, or `None` for an anonymous or expired session
    pub async fn me(&self) -> Result<Option<User>, ClientError> {
        self.execute("query { me { id name email } }", json!({}), "me")
            .await
    }

    /// All events, earliest first
    pub async fn events(&self) -> Result<Vec<Event>, ClientError> {
        let query = format!("query {{ events {{ {EVENT_FIELDS} }} }}");
        self.execute(&query, json!({}), "events").await
    }

    /// One event; a missing event is a `NOT_FOUND` GraphQL error
    pub async fn event(&self, id: &str) -> Result<Event, ClientError> {
        let query = format!("query Event($id: ID!) {{ event(id: $id) {{ {EVENT_FIELDS} }} }}");
        let event: Option<Event> = self.execute(&query, json!({ "id": id }), "event").await?;
        event.ok_or_else(|| ClientError::UnexpectedResponse(format!("event {} missing", id)))
    }

    /// Join an event as the logged-in user
    pub async fn join_event(&self, event_id: &str) -> Result<Event, ClientError> {
        let query = format!(
            "mutation JoinEvent($eventId: ID!) {{ joinEvent(eventId: $eventId) {{ {EVENT_FIELDS} }} }}"
        );
        self.execute(&query, json!({ "eventId": event_id }), "joinEvent")
            .await
    }

    /// Create an event as the logged-in user
    pub async fn create_event(
        &self,
        name: &str,
        location: &str,
        start_time: DateTime<Utc>,
    ) -> Result<Event, ClientError> {
        let query = format!(
            "mutation CreateEvent($name: String!, $location: String!, $startTime: DateTime!) {{ createEvent(name: $name, location: $location, startTime: $startTime) {{ {EVENT_FIELDS} }} }}"
        );
        self.execute(
            &query,
            json!({ "name": name, "location": location, "startTime": start_time }),
            "createEvent",
        )
        .await
    }

    /// Run one operation and decode `data.<field>`
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, ClientError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response: GraphQLResponse = request.send().await?.error_for_status()?.json().await?;

        if let Some(error) = response.errors.into_iter().next() {
            tracing::debug!("GraphQL {} failed: {}", field, error.message);
            return Err(error.into_error());
        }

        let value = response
            .data
            .and_then(|data| match data {
                Value::Object(mut fields) => fields.remove(field),
                _ => None,
            })
            .ok_or_else(|| ClientError::UnexpectedResponse(format!("missing data.{}", field)))?;

        Ok(serde_json::from_value(value)?)
    }
}
