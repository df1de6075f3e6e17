use std::sync::Arc;

use crate::pipeline::Pipeline;
use crate::traits::ResultExt;
use crate::types::Outcome;

use super::{
    Logger, PersonRepository, RegistrationConfig, RegistrationContext, RegistrationError,
    SocialNetwork,
};

/// Registers a person on the social network and announces it.
///
/// The run is a five-step [`Pipeline`]:
///
/// 1. `create_context`: load the person
/// 2. `register_account`: create the social account
/// 3. `authenticate`: obtain a token
/// 4. `publish`: post the configured message
/// 5. `update_person`: store the account id on the person
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use step_rail::registration::{
///     InMemoryPersonRepository, Logger, PersonService, RegistrationConfig, StaticSocialNetwork,
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
/// let service = PersonService::new(
///     Arc::new(InMemoryPersonRepository::canned(10)),
///     Arc::new(StaticSocialNetwork::new()),
///     PrintLogger,
///     RegistrationConfig::default(),
/// );
///
/// assert_eq!(service.register(10), "anUrl");
/// assert_eq!(service.register(11), "");
/// ```
pub struct PersonService<L> {
    pipeline: Pipeline<u64, RegistrationContext>,
    logger: L,
}

impl<L: Logger> PersonService<L> {
    pub fn new<R, S>(
        repository: Arc<R>,
        network: Arc<S>,
        logger: L,
        config: RegistrationConfig,
    ) -> Self
    where
        R: PersonRepository + 'static,
        S: SocialNetwork + 'static,
    {
        let pipeline = Pipeline::start("create_context", {
            let repository = Arc::clone(&repository);
            move |id: u64| repository.get_by_id(id).map(RegistrationContext::from)
        })
        .then("register_account", {
            let network = Arc::clone(&network);
            move |context: RegistrationContext| {
                let account = network.register(context.email(), context.name())?;
                Ok(context.with_account(account))
            }
        })
        .then("authenticate", {
            let network = Arc::clone(&network);
            move |context: RegistrationContext| {
                let token = network.authenticate(context.email(), context.password())?;
                Ok(context.with_token(token))
            }
        })
        .then("publish", {
            let network = Arc::clone(&network);
            move |context: RegistrationContext| {
                let tweet = {
                    let token = required(context.id(), context.token(), "token")?;
                    network.publish(token, &config.message)?
                };
                Ok(context.with_tweet(tweet))
            }
        })
        .then("update_person", move |context: RegistrationContext| {
            let account_id = required(context.id(), context.account_id(), "account")?;
            repository.update(context.id(), account_id)?;
            Ok(context)
        });

        Self { pipeline, logger }
    }

    /// Runs the registration and returns the published URL, or an empty
    /// string on failure. The logger is called exactly once.
    pub fn register(&self, person_id: u64) -> String {
        self.pipeline.run(
            person_id,
            |url| {
                self.logger.log_success(&format!("person {person_id} registered"));
                url
            },
            |err| {
                self.logger.log_failure(&format!("unable to register person {person_id}: {err}"));
                String::new()
            },
        )
    }

    /// Runs the registration without logging and returns the settled context.
    pub fn try_register(&self, person_id: u64) -> Outcome<RegistrationContext> {
        self.pipeline.execute(person_id)
    }

    pub fn pipeline(&self) -> &Pipeline<u64, RegistrationContext> {
        &self.pipeline
    }
}

pub(super) fn required<'a>(
    person_id: u64,
    field: Option<&'a str>,
    name: &'static str,
) -> Outcome<&'a str> {
    field.ok_or(RegistrationError::MissingField(person_id, name)).into_outcome()
}
