use std::future::Future;
use std::sync::Arc;

use crate::async_ext::AsyncPipeline;
use crate::pipeline::PipelineContext;
use crate::traits::OutcomeExt;
use crate::types::{ErrorInfo, Outcome};

use super::service::required;
use super::{
    AsyncPersonRepository, AsyncSocialNetwork, Logger, RegistrationConfig, RegistrationContext,
};

/// Async twin of [`PersonService`](super::PersonService).
///
/// Same five steps, each awaited before the next one is built.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use step_rail::registration::{
///     AsyncPersonService, InMemoryPersonRepository, Logger, RegistrationConfig,
///     StaticSocialNetwork,
/// };
///
/// # struct Silent;
/// # impl Logger for Silent {
/// #     fn log_success(&self, _: &str) {}
/// #     fn log_failure(&self, _: &str) {}
/// # }
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = AsyncPersonService::new(
///     Arc::new(InMemoryPersonRepository::canned(10)),
///     Arc::new(StaticSocialNetwork::new()),
///     Silent,
///     RegistrationConfig::default(),
/// );
///
/// assert_eq!(service.register(10).await, "anUrl");
/// # }
/// ```
pub struct AsyncPersonService<L> {
    pipeline: AsyncPipeline<u64, RegistrationContext>,
    logger: L,
}

impl<L: Logger> AsyncPersonService<L> {
    pub fn new<R, S>(
        repository: Arc<R>,
        network: Arc<S>,
        logger: L,
        config: RegistrationConfig,
    ) -> Self
    where
        R: AsyncPersonRepository + 'static,
        S: AsyncSocialNetwork + 'static,
    {
        let message: Arc<str> = Arc::from(config.message);

        let pipeline = AsyncPipeline::start("create_context", {
            let repository = Arc::clone(&repository);
            move |id: u64| {
                let repository = Arc::clone(&repository);
                async move { repository.get_by_id(id).await.map(RegistrationContext::from) }
            }
        })
        .then("register_account", {
            let network = Arc::clone(&network);
            move |context: RegistrationContext| {
                let network = Arc::clone(&network);
                async move {
                    let account = network.register(context.email(), context.name()).await?;
                    Ok::<_, ErrorInfo>(context.with_account(account))
                }
            }
        })
        .then("authenticate", {
            let network = Arc::clone(&network);
            move |context: RegistrationContext| {
                let network = Arc::clone(&network);
                async move {
                    let token = network.authenticate(context.email(), context.password()).await?;
                    Ok::<_, ErrorInfo>(context.with_token(token))
                }
            }
        })
        .then("publish", {
            let network = Arc::clone(&network);
            move |context: RegistrationContext| {
                let network = Arc::clone(&network);
                let message = Arc::clone(&message);
                async move {
                    let tweet = {
                        let token = required(context.id(), context.token(), "token")?;
                        network.publish(token, &message).await?
                    };
                    Ok::<_, ErrorInfo>(context.with_tweet(tweet))
                }
            }
        })
        .then("update_person", move |context: RegistrationContext| {
            let repository = Arc::clone(&repository);
            async move {
                {
                    let account_id = required(context.id(), context.account_id(), "account")?;
                    repository.update(context.id(), account_id).await?;
                }
                Ok::<_, ErrorInfo>(context)
            }
        });

        Self { pipeline, logger }
    }

    /// Runs the registration and returns the published URL, or an empty
    /// string on failure. The logger is called exactly once.
    pub async fn register(&self, person_id: u64) -> String {
        let outcome = self.pipeline.execute(person_id).await;
        self.settle(person_id, outcome)
    }

    /// Like [`register`](AsyncPersonService::register), but the running step
    /// gives up with a cancellation failure as soon as `signal` completes.
    pub async fn register_until<S>(&self, person_id: u64, signal: S) -> String
    where
        S: Future,
    {
        let outcome = self.pipeline.execute_until(person_id, signal).await;
        self.settle(person_id, outcome)
    }

    pub async fn try_register(&self, person_id: u64) -> Outcome<RegistrationContext> {
        self.pipeline.execute(person_id).await
    }

    pub fn pipeline(&self) -> &AsyncPipeline<u64, RegistrationContext> {
        &self.pipeline
    }

    fn settle(&self, person_id: u64, outcome: Outcome<RegistrationContext>) -> String {
        outcome.settle(
            |context| {
                self.logger.log_success(&format!("person {person_id} registered"));
                context.into_output()
            },
            |err| {
                self.logger.log_failure(&format!("unable to register person {person_id}: {err}"));
                String::new()
            },
        )
    }
}
