use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use axum_test::TestServer;
use base64::prelude::*;
use chrono::NaiveDate;

use crate::core::config::StoreConfig;
use crate::features::polls::models::{Choice, NewChoice, NewPoll, NewQuestion, Poll, Question};
use crate::features::polls::routes;
use crate::features::polls::services::{PollAdminService, PollService, VoteService};
use crate::features::polls::store::{MemoryPollStore, PollStore};

pub const ADMIN_CREDENTIALS: &str = "admin:secret";

/// Builder for a poll inserted directly through the store
pub struct SeedPoll {
    title: String,
    description: String,
    expiry: NaiveDate,
    question: Option<String>,
    choices: Vec<(String, i32)>,
}

impl SeedPoll {
    pub fn new(title: &str, expiry: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            expiry,
            question: None,
            choices: vec![("Yes".to_string(), 0), ("No".to_string(), 0)],
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn question(mut self, text: &str) -> Self {
        self.question = Some(text.to_string());
        self
    }

    /// `(choice_text, initial votes)` pairs, in id order
    pub fn choices(mut self, choices: &[(&str, i32)]) -> Self {
        self.choices = choices
            .iter()
            .map(|(text, votes)| (text.to_string(), *votes))
            .collect();
        self
    }

    fn into_new_poll(self) -> NewPoll {
        let question = self
            .question
            .unwrap_or_else(|| format!("{}?", self.title));

        NewPoll {
            created_at: self.expiry - chrono::Duration::days(7),
            expiry: self.expiry,
            title: self.title,
            description: self.description,
            question: NewQuestion {
                text: question,
                choices: self
                    .choices
                    .into_iter()
                    .map(|(choice_text, votes)| NewChoice { choice_text, votes })
                    .collect(),
            },
        }
    }
}

/// A seeded poll with the ids assigned by the store
#[derive(Debug)]
pub struct SeededPoll {
    pub poll: Poll,
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl SeededPoll {
    pub fn question_id(&self) -> i64 {
        self.question.id
    }

    pub fn choice_id(&self, index: usize) -> i64 {
        self.choices[index].id
    }
}

pub async fn seed_poll(store: &dyn PollStore, seed: SeedPoll) -> SeededPoll {
    let record = store
        .create_poll(seed.into_new_poll())
        .await
        .expect("seed poll");

    SeededPoll {
        poll: record.poll,
        question: record.question.expect("seeded poll has a question"),
        choices: record.choices,
    }
}

/// Full router over an in-memory store
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryPollStore>,
}

impl TestApp {
    pub async fn seed(&self, seed: SeedPoll) -> SeededPoll {
        seed_poll(self.store.as_ref(), seed).await
    }

    /// Current tallies of a poll's choices in id order; empty once deleted
    pub async fn votes(&self, poll_id: i64) -> Vec<i32> {
        self.store
            .load_poll(poll_id)
            .await
            .expect("load poll")
            .map(|record| record.choices.iter().map(|c| c.votes).collect())
            .unwrap_or_default()
    }
}

pub async fn test_app() -> TestApp {
    let store = Arc::new(MemoryPollStore::new());
    let shared: Arc<dyn PollStore> = store.clone();

    let polls = Arc::new(PollService::new(Arc::clone(&shared)));
    let votes = Arc::new(VoteService::new(Arc::clone(&shared)));
    let admin = Arc::new(PollAdminService::new(
        shared,
        StoreConfig::default().default_expiry_days,
    ));

    let app = Router::new()
        .merge(routes::page_routes(Arc::clone(&polls), Arc::clone(&votes)))
        .merge(routes::api_routes(polls, votes))
        .merge(routes::admin_routes(
            admin,
            Arc::new(ADMIN_CREDENTIALS.to_string()),
        ));

    TestApp {
        server: TestServer::new(app).expect("test server"),
        store,
    }
}

pub fn admin_auth_header() -> HeaderValue {
    let encoded = BASE64_STANDARD.encode(ADMIN_CREDENTIALS);
    HeaderValue::from_str(&format!("Basic {}", encoded)).expect("valid header value")
}
