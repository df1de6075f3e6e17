use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use step_rail::registration::{AsyncPersonService, RegistrationConfig};

use super::common::{rick, CountingNetwork, CountingRepository, Entry, RecordingLogger};

struct Fixture {
    repository: Arc<CountingRepository>,
    network: Arc<CountingNetwork>,
    logger: Arc<RecordingLogger>,
    service: AsyncPersonService<Arc<RecordingLogger>>,
}

fn fixture(network: CountingNetwork) -> Fixture {
    let repository = Arc::new(CountingRepository::with(rick(10)));
    let network = Arc::new(network);
    let logger = Arc::new(RecordingLogger::default());
    let service = AsyncPersonService::new(
        Arc::clone(&repository),
        Arc::clone(&network),
        Arc::clone(&logger),
        RegistrationConfig::default(),
    );
    Fixture { repository, network, logger, service }
}

#[tokio::test]
async fn scenario_d_success_matches_sync() {
    let f = fixture(CountingNetwork::default());

    assert_eq!(f.service.register(10).await, "anUrl");

    assert_eq!(f.logger.entries(), vec![Entry::Success("person 10 registered".to_owned())]);
    assert_eq!(f.network.publications.load(Ordering::SeqCst), 1);
    assert_eq!(*f.repository.updates.lock().unwrap(), vec![(10, "9".to_owned())]);
}

#[tokio::test]
async fn scenario_d_lookup_failure_matches_sync() {
    let f = fixture(CountingNetwork::default());

    assert_eq!(f.service.register(11).await, "");

    assert_eq!(
        f.logger.entries(),
        vec![Entry::Failure(
            "unable to register person 11: step 1 (create_context) -> person 11 not found".to_owned()
        )]
    );
    assert_eq!(f.network.registrations.load(Ordering::SeqCst), 0);
    assert_eq!(f.repository.update_count(), 0);
}

#[tokio::test]
async fn scenario_d_registration_failure_matches_sync() {
    let f = fixture(CountingNetwork::rejecting());

    let err = f.service.try_register(10).await.unwrap_err();

    assert_eq!(err.failed_step(), Some((2, "register_account")));
    assert_eq!(f.network.calls_after_registration(), 0);
    assert_eq!(f.repository.update_count(), 0);
}

#[tokio::test]
async fn panic_while_polling_a_step_is_captured() {
    let f = fixture(CountingNetwork::panicking_on_publish());

    assert_eq!(f.service.register(10).await, "");

    let entries = f.logger.entries();
    assert_eq!(entries.len(), 1);
    assert!(matches!(&entries[0], Entry::Failure(text) if text.contains("step 4 (publish)")));
    assert_eq!(f.repository.update_count(), 0);
}

#[tokio::test]
async fn cancellation_settles_through_the_failure_branch() {
    let f = fixture(CountingNetwork::default());

    let url = f.service.register_until(10, std::future::ready(())).await;

    assert_eq!(url, "");
    assert_eq!(
        f.logger.entries(),
        vec![Entry::Failure(
            "unable to register person 10: step 1 (create_context) -> operation cancelled".to_owned()
        )]
    );
    assert_eq!(f.repository.update_count(), 0);
}

#[tokio::test]
async fn cancellation_is_recorded_against_the_running_step() {
    let f = fixture(CountingNetwork::stalling());

    let url = f.service.register_until(10, tokio::time::sleep(Duration::from_millis(20))).await;

    assert_eq!(url, "");
    assert_eq!(
        f.logger.entries(),
        vec![Entry::Failure(
            "unable to register person 10: step 2 (register_account) -> operation cancelled"
                .to_owned()
        )]
    );
    assert_eq!(f.network.registrations.load(Ordering::SeqCst), 1);
    assert_eq!(f.network.calls_after_registration(), 0);
    assert_eq!(f.repository.update_count(), 0);
}

#[tokio::test]
async fn cancelled_pipeline_reports_the_step_it_stopped_in() {
    let f = fixture(CountingNetwork::stalling());

    let err = f
        .service
        .pipeline()
        .execute_until(10, tokio::time::sleep(Duration::from_millis(20)))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.failed_step(), Some((2, "register_account")));
    assert_eq!(f.network.calls_after_registration(), 0);
}

#[tokio::test]
async fn late_signal_does_not_cancel() {
    let f = fixture(CountingNetwork::default());

    let url = f.service.register_until(10, tokio::time::sleep(Duration::from_secs(60))).await;

    assert_eq!(url, "anUrl");
}

#[tokio::test]
async fn service_can_be_shared_across_tasks() {
    let f = fixture(CountingNetwork::default());
    let service = Arc::new(f.service);

    let handles: Vec<_> = [10, 11, 10]
        .into_iter()
        .map(|id| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.register(id).await })
        })
        .collect();

    let mut urls = Vec::new();
    for handle in handles {
        urls.push(handle.await.unwrap());
    }

    assert_eq!(urls, ["anUrl", "", "anUrl"]);
    assert_eq!(f.logger.entries().len(), 3);
    assert_eq!(f.repository.update_count(), 2);
}
