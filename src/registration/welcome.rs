use std::sync::Arc;

use crate::types::{ErrorInfo, Rail};

use super::{Logger, Mailer, PersonRepository};

/// How a welcome mail run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The mail went out to this address.
    Sent(String),
    /// The person exists but has no email address.
    NoAddress,
    Failed(ErrorInfo),
}

/// Looks up a person's email and sends them a welcome mail.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use step_rail::registration::{
///     Delivery, InMemoryPersonRepository, Logger, NoopMailer, WelcomeMailer,
/// };
///
/// struct PrintLogger;
///
/// impl Logger for PrintLogger {
///     fn log_success(&self, text: &str) {
///         println!("{text}");
///     }
///
///     fn log_failure(&self, text: &str) {
///         eprintln!("{text}");
///     }
/// }
///
/// let mailer = WelcomeMailer::new(
///     Arc::new(InMemoryPersonRepository::canned(10)),
///     Arc::new(NoopMailer::new()),
///     PrintLogger,
/// );
///
/// assert_eq!(mailer.send(10), Delivery::Sent("rick.sanchez@crazy.com".to_owned()));
/// assert!(matches!(mailer.send(11), Delivery::Failed(_)));
/// ```
pub struct WelcomeMailer<R, M, L> {
    repository: Arc<R>,
    mailer: Arc<M>,
    logger: L,
}

impl<R, M, L> WelcomeMailer<R, M, L>
where
    R: PersonRepository,
    M: Mailer,
    L: Logger,
{
    pub fn new(repository: Arc<R>, mailer: Arc<M>, logger: L) -> Self {
        Self { repository, mailer, logger }
    }

    /// Sends the welcome mail for `person_id`. The logger is called exactly once.
    pub fn send(&self, person_id: u64) -> Delivery {
        let outcome = Rail::start("lookup_email", || self.repository.get_by_id(person_id))
            .map(|person| Some(person.email).filter(|email| !email.is_empty()))
            .then("send_welcome", |email| match email {
                Some(email) => self.mailer.send_welcome(&email).map(|()| Some(email)),
                None => Ok(None),
            })
            .finish();

        match outcome {
            Ok(Some(email)) => {
                self.logger.log_success(&format!("email sent for {person_id}"));
                Delivery::Sent(email)
            },
            Ok(None) => {
                self.logger.log_failure(&format!("email not sent for {person_id}"));
                Delivery::NoAddress
            },
            Err(err) => {
                self.logger.log_failure(&format!("error for {person_id}: {err}"));
                Delivery::Failed(err)
            },
        }
    }
}
