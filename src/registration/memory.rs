//! Deterministic in-memory collaborators.
//!
//! They never suspend and never fail on their own, apart from unknown person
//! ids. Tests and demos wrap or replace them to inject failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::traits::IntoErrorInfo;
use crate::types::Outcome;

use super::{
    Account, AsyncPersonRepository, AsyncSocialNetwork, Mailer, Person, PersonRepository,
    RegistrationError, SocialNetwork, Tweet,
};

/// People kept in a map, with every `update` recorded.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    people: RwLock<HashMap<u64, Person>>,
    updates: RwLock<Vec<(u64, String)>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding Rick Sanchez under `id`.
    pub fn canned(id: u64) -> Self {
        let repository = Self::new();
        repository.insert(Person::new(id, "rick.sanchez@crazy.com", "Rick Sanchez", "wubbalubba"));
        repository
    }

    pub fn insert(&self, person: Person) {
        self.people.write().unwrap_or_else(PoisonError::into_inner).insert(person.id, person);
    }

    /// `(person_id, account_id)` pairs passed to `update`, oldest first.
    pub fn updates(&self) -> Vec<(u64, String)> {
        self.updates.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn lookup(&self, id: u64) -> Outcome<Person> {
        self.people
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| RegistrationError::PersonNotFound(id).into_error_info())
    }

    fn record_update(&self, person_id: u64, account_id: &str) -> Outcome<()> {
        self.updates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((person_id, account_id.to_owned()));
        Ok(())
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn get_by_id(&self, id: u64) -> Outcome<Person> {
        self.lookup(id)
    }

    fn update(&self, person_id: u64, account_id: &str) -> Outcome<()> {
        self.record_update(person_id, account_id)
    }
}

impl AsyncPersonRepository for InMemoryPersonRepository {
    async fn get_by_id(&self, id: u64) -> Outcome<Person> {
        self.lookup(id)
    }

    async fn update(&self, person_id: u64, account_id: &str) -> Outcome<()> {
        self.record_update(person_id, account_id)
    }
}

/// A social network that accepts everyone.
///
/// Accounts get id `"9"`, tokens are numbered and every publish returns the
/// same URL (`"anUrl"` unless changed with [`with_url`](StaticSocialNetwork::with_url)).
#[derive(Debug)]
pub struct StaticSocialNetwork {
    account_id: String,
    url: String,
    issued_tokens: AtomicU64,
}

impl StaticSocialNetwork {
    pub fn new() -> Self {
        Self { account_id: "9".to_owned(), url: "anUrl".to_owned(), issued_tokens: AtomicU64::new(0) }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn issued_tokens(&self) -> u64 {
        self.issued_tokens.load(Ordering::Relaxed)
    }

    fn account(&self) -> Account {
        Account { id: self.account_id.clone() }
    }

    fn token(&self) -> String {
        let n = self.issued_tokens.fetch_add(1, Ordering::Relaxed) + 1;
        format!("token-{n}")
    }

    fn tweet(&self) -> Tweet {
        Tweet { url: self.url.clone() }
    }
}

impl Default for StaticSocialNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialNetwork for StaticSocialNetwork {
    fn register(&self, _email: &str, _name: &str) -> Outcome<Account> {
        Ok(self.account())
    }

    fn authenticate(&self, _email: &str, _password: &str) -> Outcome<String> {
        Ok(self.token())
    }

    fn publish(&self, _token: &str, _message: &str) -> Outcome<Tweet> {
        Ok(self.tweet())
    }
}

impl AsyncSocialNetwork for StaticSocialNetwork {
    async fn register(&self, _email: &str, _name: &str) -> Outcome<Account> {
        Ok(self.account())
    }

    async fn authenticate(&self, _email: &str, _password: &str) -> Outcome<String> {
        Ok(self.token())
    }

    async fn publish(&self, _token: &str, _message: &str) -> Outcome<Tweet> {
        Ok(self.tweet())
    }
}

/// A mailer that only counts what it was asked to send.
#[derive(Debug, Default)]
pub struct NoopMailer {
    sent: AtomicUsize,
}

impl NoopMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

impl Mailer for NoopMailer {
    fn send_welcome(&self, _email: &str) -> Outcome<()> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
