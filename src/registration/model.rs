use crate::pipeline::PipelineContext;

/// A person as stored by a [`PersonRepository`](super::PersonRepository).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Person {
    pub fn new(
        id: u64,
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { id, email: email.into(), name: name.into(), password: password.into() }
    }
}

/// Account handed out by the social network on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
}

/// A published message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub url: String,
}

/// The record threaded through the registration pipeline.
///
/// Built from a [`Person`] by the entry step; every later step consumes it and
/// returns a copy with one more field filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationContext {
    id: u64,
    email: String,
    name: String,
    password: String,
    account_id: Option<String>,
    token: Option<String>,
    url: Option<String>,
}

impl RegistrationContext {
    #[must_use]
    pub fn with_account(self, account: Account) -> Self {
        Self { account_id: Some(account.id), ..self }
    }

    #[must_use]
    pub fn with_token(self, token: String) -> Self {
        Self { token: Some(token), ..self }
    }

    #[must_use]
    pub fn with_tweet(self, tweet: Tweet) -> Self {
        Self { url: Some(tweet.url), ..self }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl From<Person> for RegistrationContext {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            email: person.email,
            name: person.name,
            password: person.password,
            account_id: None,
            token: None,
            url: None,
        }
    }
}

impl PipelineContext for RegistrationContext {
    type Output = String;

    /// The URL of the published message.
    fn into_output(self) -> String {
        self.url.unwrap_or_default()
    }
}
