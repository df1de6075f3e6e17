use std::sync::Arc;

use step_rail::registration::{
    Delivery, InMemoryPersonRepository, Mailer, NoopMailer, Person, RegistrationError, WelcomeMailer,
};
use step_rail::{ErrorInfo, Outcome};

use super::common::{Entry, RecordingLogger};

struct BouncingMailer;

impl Mailer for BouncingMailer {
    fn send_welcome(&self, email: &str) -> Outcome<()> {
        Err(ErrorInfo::new(format!("mailbox {email} is full")))
    }
}

fn repository() -> Arc<InMemoryPersonRepository> {
    let repository = InMemoryPersonRepository::canned(10);
    repository.insert(Person::new(20, "", "Morty Smith", "aw-jeez"));
    Arc::new(repository)
}

#[test]
fn sends_to_known_address() {
    let mailer = Arc::new(NoopMailer::new());
    let logger = Arc::new(RecordingLogger::default());
    let welcome = WelcomeMailer::new(repository(), Arc::clone(&mailer), Arc::clone(&logger));

    assert_eq!(welcome.send(10), Delivery::Sent("rick.sanchez@crazy.com".to_owned()));
    assert_eq!(mailer.sent(), 1);
    assert_eq!(logger.entries(), vec![Entry::Success("email sent for 10".to_owned())]);
}

#[test]
fn empty_address_is_not_mailed() {
    let mailer = Arc::new(NoopMailer::new());
    let logger = Arc::new(RecordingLogger::default());
    let welcome = WelcomeMailer::new(repository(), Arc::clone(&mailer), Arc::clone(&logger));

    assert_eq!(welcome.send(20), Delivery::NoAddress);
    assert_eq!(mailer.sent(), 0);
    assert_eq!(logger.entries(), vec![Entry::Failure("email not sent for 20".to_owned())]);
}

#[test]
fn unknown_person_fails_at_lookup() {
    let logger = Arc::new(RecordingLogger::default());
    let welcome = WelcomeMailer::new(repository(), Arc::new(NoopMailer::new()), Arc::clone(&logger));

    let Delivery::Failed(err) = welcome.send(99) else {
        panic!("expected a failed delivery");
    };
    assert_eq!(err.failed_step(), Some((1, "lookup_email")));
    assert_eq!(err.downcast_source::<RegistrationError>(), Some(&RegistrationError::PersonNotFound(99)));
    assert_eq!(
        logger.entries(),
        vec![Entry::Failure("error for 99: step 1 (lookup_email) -> person 99 not found".to_owned())]
    );
}

#[test]
fn mailer_failure_is_reported_at_send_step() {
    let logger = Arc::new(RecordingLogger::default());
    let welcome = WelcomeMailer::new(repository(), Arc::new(BouncingMailer), Arc::clone(&logger));

    let Delivery::Failed(err) = welcome.send(10) else {
        panic!("expected a failed delivery");
    };
    assert_eq!(err.failed_step(), Some((2, "send_welcome")));
    assert_eq!(err.message(), "mailbox rick.sanchez@crazy.com is full");
    assert_eq!(logger.entries().len(), 1);
}
