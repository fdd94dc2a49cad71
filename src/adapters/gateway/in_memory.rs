//! In-memory profile gateway for tests and offline development.
//!
//! Rows are kept per user id. Scripted responses can be queued to simulate
//! failures, slow answers and out-of-order completion.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::foundation::CurrentUser;
use crate::domain::profile::ProfileFields;
use crate::ports::{GatewayResponse, ProfileGateway};

#[derive(Debug)]
struct Scripted {
    delay: Duration,
    response: GatewayResponse,
}

/// Remote profile table held in memory.
#[derive(Debug, Default)]
pub struct InMemoryProfileGateway {
    rows: Mutex<HashMap<String, ProfileFields>>,
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl InMemoryProfileGateway {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the row for `user_id`.
    pub fn with_row(self, user_id: impl Into<String>, row: ProfileFields) -> Self {
        self.insert_row(user_id, row);
        self
    }

    /// Adds (or replaces) the row for `user_id` at runtime.
    pub fn insert_row(&self, user_id: impl Into<String>, row: ProfileFields) {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.into(), row);
    }

    /// Queues a response returned (after `delay`) by the next call instead
    /// of the table lookup. Queued responses are consumed in order.
    pub fn push_response(&self, delay: Duration, response: GatewayResponse) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted { delay, response });
    }

    /// Number of `fetch_by_id` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, user_id: &str) -> GatewayResponse {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        match rows.get(user_id) {
            Some(row) => GatewayResponse::found(row.clone()),
            None => GatewayResponse::no_rows(),
        }
    }
}

#[async_trait]
impl ProfileGateway for InMemoryProfileGateway {
    async fn fetch_by_id(&self, user: &CurrentUser) -> GatewayResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match scripted {
            Some(Scripted { delay, response }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => self.lookup(user.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{FetchOutcome, GatewayError};

    fn user(id: &str) -> CurrentUser {
        CurrentUser::new(UserId::new(id).unwrap())
    }

    #[tokio::test]
    async fn known_row_is_found() {
        let gateway = InMemoryProfileGateway::new()
            .with_row("u1", ProfileFields::new().with("id", "u1").with("bio", "hi"));

        let outcome = gateway.fetch_by_id(&user("u1")).await.classify();

        assert!(matches!(outcome, FetchOutcome::Found(row) if row.get_str("bio") == Some("hi")));
    }

    #[tokio::test]
    async fn unknown_row_is_absent() {
        let gateway = InMemoryProfileGateway::new();

        let outcome = gateway.fetch_by_id(&user("u1")).await.classify();

        assert_eq!(outcome, FetchOutcome::Absent);
    }

    #[tokio::test]
    async fn scripted_responses_take_priority_in_order() {
        let gateway = InMemoryProfileGateway::new().with_row("u1", ProfileFields::new());
        gateway.push_response(
            Duration::ZERO,
            GatewayResponse::failed(503, GatewayError::new("maintenance")),
        );

        let first = gateway.fetch_by_id(&user("u1")).await.classify();
        let second = gateway.fetch_by_id(&user("u1")).await.classify();

        assert!(matches!(first, FetchOutcome::Failed(_)));
        assert!(matches!(second, FetchOutcome::Found(_)));
        assert_eq!(gateway.call_count(), 2);
    }
}
