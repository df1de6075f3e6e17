//! Person registration on a social network, built on [`Pipeline`](crate::Pipeline).
//!
//! The services talk to the outside world only through the narrow
//! collaborator traits below. Each has a sync and an async flavour.
//! [`memory`] holds deterministic in-memory implementations.
//!
//! A run always ends in exactly one [`Logger`] call, made from the terminal
//! matcher. Per-step progress is traced with `tracing` when that feature is on.

use std::future::Future;

use crate::types::Outcome;

mod config;
mod error;
mod logger;
pub mod memory;
mod model;
mod service;
mod welcome;

#[cfg(feature = "async")]
mod async_service;

pub use config::{RegistrationConfig, DEFAULT_MESSAGE};
pub use error::RegistrationError;
pub use logger::Logger;
#[cfg(feature = "tracing")]
pub use logger::TracingLogger;
pub use memory::{InMemoryPersonRepository, NoopMailer, StaticSocialNetwork};
pub use model::{Account, Person, RegistrationContext, Tweet};
pub use service::PersonService;
pub use welcome::{Delivery, WelcomeMailer};

#[cfg(feature = "async")]
pub use async_service::AsyncPersonService;

/// Storage for people.
pub trait PersonRepository: Send + Sync {
    /// Fails with [`RegistrationError::PersonNotFound`] when `id` is unknown.
    fn get_by_id(&self, id: u64) -> Outcome<Person>;

    fn update(&self, person_id: u64, account_id: &str) -> Outcome<()>;
}

/// The social network people are registered on.
pub trait SocialNetwork: Send + Sync {
    fn register(&self, email: &str, name: &str) -> Outcome<Account>;

    /// Returns a session token.
    fn authenticate(&self, email: &str, password: &str) -> Outcome<String>;

    fn publish(&self, token: &str, message: &str) -> Outcome<Tweet>;
}

pub trait Mailer: Send + Sync {
    fn send_welcome(&self, email: &str) -> Outcome<()>;
}

/// Async flavour of [`PersonRepository`].
pub trait AsyncPersonRepository: Send + Sync {
    fn get_by_id(&self, id: u64) -> impl Future<Output = Outcome<Person>> + Send;

    fn update(&self, person_id: u64, account_id: &str)
        -> impl Future<Output = Outcome<()>> + Send;
}

/// Async flavour of [`SocialNetwork`].
pub trait AsyncSocialNetwork: Send + Sync {
    fn register(&self, email: &str, name: &str) -> impl Future<Output = Outcome<Account>> + Send;

    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Outcome<String>> + Send;

    fn publish(&self, token: &str, message: &str) -> impl Future<Output = Outcome<Tweet>> + Send;
}
