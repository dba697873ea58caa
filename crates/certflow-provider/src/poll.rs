//! Deployment job submission and status polling
//!
//! State machine: submitted -> polling -> {succeeded, failed}. A status
//! outside the contracted vocabulary is an invariant violation and terminates
//! the operation immediately. The poller enforces no retry cap of its own;
//! bounding total wait time is the caller's job via the cancellation token's
//! deadline.

use crate::adapter::{DeploymentApi, JobRequest, JobStatus};
use crate::artifact::DeployResult;
use crate::cancel::{CancelToken, Delay, TokioDelay};
use crate::error::{ProviderError, Result};
use crate::logging::{self, Logger};
use std::sync::Arc;
use std::time::Duration;

/// Fixed backoff between status reads.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Drives a deployment job to a terminal state
pub struct DeployJobPoller {
    logger: Logger,
    delay: Arc<dyn Delay>,
    interval: Duration,
}

impl DeployJobPoller {
    pub fn new() -> Self {
        Self {
            logger: logging::noop(),
            delay: Arc::new(TokioDelay),
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Substitute the sleep dependency, used by tests to simulate ticks.
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    /// Submit a deployment job for `cert_id` and poll until terminal.
    ///
    /// When `contact_ids` is empty the vendor's first available contact is
    /// used. The cancellation signal is observed at the top of every poll
    /// iteration, so a triggered signal is reported within one interval and
    /// no further vendor calls are issued.
    pub async fn run(
        &self,
        cancel: &CancelToken,
        api: &dyn DeploymentApi,
        cert_id: &str,
        resource_ids: &[String],
        contact_ids: &[String],
    ) -> Result<DeployResult> {
        cancel.check()?;

        let contact_ids = if contact_ids.is_empty() {
            match api.first_contact_id().await? {
                Some(id) => vec![id],
                None => Vec::new(),
            }
        } else {
            contact_ids.to_vec()
        };

        let request = JobRequest {
            cert_id: cert_id.to_string(),
            job_name: format!("certflow-{}", chrono::Utc::now().timestamp_millis()),
            resource_ids: resource_ids.to_vec(),
            contact_ids,
        };
        let job_id = api.submit_job(&request).await?;
        self.logger.info("deployment job created");

        loop {
            cancel.check()?;

            match api.job_status(&job_id).await? {
                JobStatus::Success => {
                    self.logger.info("deployment job succeeded");
                    return Ok(DeployResult::default());
                }
                JobStatus::Failure => {
                    return Err(ProviderError::JobFailed { job_id });
                }
                JobStatus::Unknown(status) => {
                    return Err(ProviderError::UnexpectedState {
                        operation: "describe deployment job".to_string(),
                        status,
                    });
                }
                JobStatus::Pending => {
                    self.logger.info("deployment job not finished yet ...");
                    self.delay.sleep(self.interval).await;
                }
            }
        }
    }
}

impl Default for DeployJobPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted deployment API: pops one status per poll.
    struct FakeApi {
        statuses: Mutex<Vec<JobStatus>>,
        first_contact: Option<String>,
        contact_calls: AtomicUsize,
        submit_calls: AtomicUsize,
        status_calls: AtomicUsize,
        submitted: Mutex<Option<JobRequest>>,
    }

    impl FakeApi {
        fn with_statuses(statuses: Vec<JobStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                first_contact: Some("contact-1".to_string()),
                contact_calls: AtomicUsize::new(0),
                submit_calls: AtomicUsize::new(0),
                status_calls: AtomicUsize::new(0),
                submitted: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl DeploymentApi for FakeApi {
        async fn first_contact_id(&self) -> Result<Option<String>> {
            self.contact_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.first_contact.clone())
        }

        async fn submit_job(&self, request: &JobRequest) -> Result<String> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            *self.submitted.lock().unwrap() = Some(request.clone());
            Ok("job-1".to_string())
        }

        async fn job_status(&self, _job_id: &str) -> Result<JobStatus> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                return Ok(JobStatus::Pending);
            }
            Ok(statuses.remove(0))
        }
    }

    /// Counts sleeps; optionally cancels a token on the first sleep.
    struct FakeDelay {
        sleeps: AtomicUsize,
        cancel_on_sleep: Option<CancelToken>,
    }

    impl FakeDelay {
        fn counting() -> Self {
            Self {
                sleeps: AtomicUsize::new(0),
                cancel_on_sleep: None,
            }
        }
    }

    #[async_trait]
    impl Delay for FakeDelay {
        async fn sleep(&self, _duration: Duration) {
            self.sleeps.fetch_add(1, Ordering::SeqCst);
            if let Some(token) = &self.cancel_on_sleep {
                token.cancel();
            }
        }
    }

    fn resources() -> Vec<String> {
        vec!["resource-1".to_string()]
    }

    #[tokio::test]
    async fn test_k_pending_ticks_then_success_polls_k_plus_one_times() {
        let api = FakeApi::with_statuses(vec![
            JobStatus::Pending,
            JobStatus::Pending,
            JobStatus::Pending,
            JobStatus::Success,
        ]);
        let delay = Arc::new(FakeDelay::counting());
        let poller = DeployJobPoller::new().with_delay(delay.clone());

        poller
            .run(&CancelToken::new(), &api, "cert-1", &resources(), &[])
            .await
            .unwrap();

        assert_eq!(api.status_calls.load(Ordering::SeqCst), 4);
        assert_eq!(delay.sleeps.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_unexpected_status_fails_without_sleeping() {
        let api = FakeApi::with_statuses(vec![JobStatus::Unknown("editing".to_string())]);
        let delay = Arc::new(FakeDelay::counting());
        let poller = DeployJobPoller::new().with_delay(delay.clone());

        let result = poller
            .run(&CancelToken::new(), &api, "cert-1", &resources(), &[])
            .await;

        match result {
            Err(ProviderError::UnexpectedState { status, .. }) => assert_eq!(status, "editing"),
            other => panic!("expected unexpected-state error, got {other:?}"),
        }
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 1);
        assert_eq!(delay.sleeps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_status_is_terminal() {
        let api = FakeApi::with_statuses(vec![JobStatus::Pending, JobStatus::Failure]);
        let delay = Arc::new(FakeDelay::counting());
        let poller = DeployJobPoller::new().with_delay(delay);

        let result = poller
            .run(&CancelToken::new(), &api, "cert-1", &resources(), &[])
            .await;
        assert!(matches!(result, Err(ProviderError::JobFailed { job_id }) if job_id == "job-1"));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancellation_mid_poll_stops_further_calls() {
        let api = FakeApi::with_statuses(Vec::new()); // pending forever
        let cancel = CancelToken::new();
        let delay = Arc::new(FakeDelay {
            sleeps: AtomicUsize::new(0),
            cancel_on_sleep: Some(cancel.clone()),
        });
        let poller = DeployJobPoller::new().with_delay(delay.clone());

        let result = poller
            .run(&cancel, &api, "cert-1", &resources(), &[])
            .await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));
        // One status read before the sleep that fired the token, none after
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 1);
        assert_eq!(delay.sleeps.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_contacts_resolved_from_first_available() {
        let api = FakeApi::with_statuses(vec![JobStatus::Success]);
        let poller = DeployJobPoller::new().with_delay(Arc::new(FakeDelay::counting()));

        poller
            .run(&CancelToken::new(), &api, "cert-1", &resources(), &[])
            .await
            .unwrap();

        assert_eq!(api.contact_calls.load(Ordering::SeqCst), 1);
        let submitted = api.submitted.lock().unwrap().clone().unwrap();
        assert_eq!(submitted.contact_ids, vec!["contact-1".to_string()]);
        assert_eq!(submitted.cert_id, "cert-1");
        assert!(submitted.job_name.starts_with("certflow-"));
    }

    #[tokio::test]
    async fn test_configured_contacts_skip_lookup() {
        let api = FakeApi::with_statuses(vec![JobStatus::Success]);
        let poller = DeployJobPoller::new().with_delay(Arc::new(FakeDelay::counting()));

        poller
            .run(
                &CancelToken::new(),
                &api,
                "cert-1",
                &resources(),
                &["contact-9".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(api.contact_calls.load(Ordering::SeqCst), 0);
        let submitted = api.submitted.lock().unwrap().clone().unwrap();
        assert_eq!(submitted.contact_ids, vec!["contact-9".to_string()]);
    }
}
