//! Waiting for enqueued jobs to complete.
//!
//! Mutating Aruba Cloud actions only enqueue a job and return. The helpers
//! here poll a read endpoint until the effect of that job is observable:
//!
//! - [`wait_for_status`] polls a single entity until it reports a target status.
//! - [`wait_for_named`] polls a listing until an entity with a given name appears.
//!
//! Both spend a failure budget on transient fetch errors. The budget covers the
//! whole wait: a successful poll does not refill it. Any non-transient error is
//! returned on first sight.
//!
//! Neither helper bounds how long it waits for a status that never arrives. Set
//! [`WaitSpec::with_deadline`] or [`WaitSpec::with_cancellation`] when the caller
//! needs an upper bound.

use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::types::{CloudServer, CloudServerDetails, PurchasedVlan, ServerStatus};

/// Default delay between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default number of transient fetch failures tolerated per wait.
///
/// Accounts for the API randomly not answering while a job runs.
pub const DEFAULT_MAX_FAILURES: u32 = 4;

/// Parameters of one polling loop.
#[derive(Debug, Clone)]
pub struct WaitSpec {
    /// Delay after a poll that did not satisfy the target
    pub poll_interval: Duration,
    /// Transient fetch failures tolerated before giving up
    pub max_failures: u32,
    /// Upper bound on the whole wait (None = unbounded)
    pub deadline: Option<Duration>,
    /// Token that aborts the wait when cancelled
    pub cancellation: Option<CancellationToken>,
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_failures: DEFAULT_MAX_FAILURES,
            deadline: None,
            cancellation: None,
        }
    }
}

impl WaitSpec {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_failures(mut self, max_failures: u32) -> Self {
        self.max_failures = max_failures;
        self
    }

    /// Fail with [`Error::Timeout`] if the wait is still running after `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Fail with [`Error::Cancelled`] as soon as `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// An entity whose state is driven by server-side jobs.
pub trait Stateful {
    type Status: PartialEq + Copy + Debug;

    fn status(&self) -> Self::Status;
}

/// An entity that can be looked up by name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Stateful for CloudServerDetails {
    type Status = ServerStatus;

    fn status(&self) -> ServerStatus {
        self.server_status
    }
}

impl Stateful for CloudServer {
    type Status = ServerStatus;

    fn status(&self) -> ServerStatus {
        self.server_status
    }
}

impl Named for CloudServer {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for CloudServerDetails {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for PurchasedVlan {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Read access to a single server's current state.
#[async_trait]
pub trait ServerStateSource: Send + Sync {
    async fn server_details(&self, server_id: i64) -> Result<CloudServerDetails>;
}

/// Read access to the account's server listing.
#[async_trait]
pub trait ServerListing: Send + Sync {
    async fn list_servers(&self) -> Result<Vec<CloudServer>>;
}

/// Transient failures absorbed so far during one wait.
#[derive(Debug, Default)]
struct FailureBudget {
    spent: u32,
}

impl FailureBudget {
    /// Record `error`, handing it back once it can no longer be absorbed.
    fn absorb(&mut self, error: Error, max_failures: u32) -> Result<()> {
        if !error.is_transient() || self.spent >= max_failures {
            return Err(error);
        }
        self.spent += 1;
        Ok(())
    }
}

/// Poll `fetch` until the entity reports `target`.
///
/// Returns the first entity observed in the target state. A matching first
/// poll returns without sleeping. A transient fetch error is retried at once,
/// without sleeping, until `spec.max_failures` of them have been absorbed;
/// the next one is returned unchanged.
///
/// ```
/// use arubacloud_rs::sdk::wait::{wait_for_status, Stateful, WaitSpec};
///
/// struct Job(u8);
///
/// impl Stateful for Job {
///     type Status = u8;
///
///     fn status(&self) -> u8 {
///         self.0
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let fetch = || async { Ok::<_, arubacloud_rs::Error>(Job(2)) };
/// let job = wait_for_status(fetch, 2, &WaitSpec::default()).await.unwrap();
/// assert_eq!(job.0, 2);
/// # });
/// ```
pub async fn wait_for_status<F, Fut, E>(fetch: F, target: E::Status, spec: &WaitSpec) -> Result<E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<E>>,
    E: Stateful,
{
    bounded(spec, poll_status(fetch, target, spec)).await
}

/// Poll `list` until it contains an entity named `name`.
///
/// The first matching entity wins and is returned as soon as it is seen.
/// Failure handling is the same as [`wait_for_status`].
pub async fn wait_for_named<F, Fut, E>(list: F, name: &str, spec: &WaitSpec) -> Result<E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<E>>>,
    E: Named,
{
    bounded(spec, poll_named(list, name, spec)).await
}

/// Wait until the server `server_id` reports `target`.
pub async fn wait_for_server_status(
    source: &dyn ServerStateSource,
    server_id: i64,
    target: ServerStatus,
    spec: &WaitSpec,
) -> Result<CloudServerDetails> {
    wait_for_status(|| source.server_details(server_id), target, spec).await
}

/// Wait until a server called `name` shows up in the listing.
pub async fn wait_for_server_named(
    listing: &dyn ServerListing,
    name: &str,
    spec: &WaitSpec,
) -> Result<CloudServer> {
    wait_for_named(|| listing.list_servers(), name, spec).await
}

async fn poll_status<F, Fut, E>(mut fetch: F, target: E::Status, spec: &WaitSpec) -> Result<E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<E>>,
    E: Stateful,
{
    let mut budget = FailureBudget::default();
    loop {
        match fetch().await {
            Ok(entity) if entity.status() == target => return Ok(entity),
            Ok(_) => sleep(spec.poll_interval).await,
            Err(e) => budget.absorb(e, spec.max_failures)?,
        }
    }
}

async fn poll_named<F, Fut, E>(mut list: F, name: &str, spec: &WaitSpec) -> Result<E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<E>>>,
    E: Named,
{
    let mut budget = FailureBudget::default();
    loop {
        match list().await {
            Ok(entities) => match entities.into_iter().find(|e| e.name() == name) {
                Some(found) => return Ok(found),
                None => sleep(spec.poll_interval).await,
            },
            Err(e) => budget.absorb(e, spec.max_failures)?,
        }
    }
}

/// Apply the wait's deadline and cancellation token to a wait.
async fn bounded<T>(spec: &WaitSpec, wait: impl Future<Output = Result<T>>) -> Result<T> {
    let timed = async {
        match spec.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, wait).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout {
                    seconds: deadline.as_secs(),
                }),
            },
            None => wait.await,
        }
    };

    match &spec.cancellation {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(Error::Cancelled),
            result = timed => result,
        },
        None => timed.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::ready;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    const POLL: Duration = Duration::from_secs(10);

    fn spec() -> WaitSpec {
        WaitSpec::default().with_poll_interval(POLL)
    }

    fn server(status: ServerStatus) -> CloudServerDetails {
        CloudServerDetails {
            server_id: 1,
            server_status: status,
            ..Default::default()
        }
    }

    fn listed(name: &str) -> CloudServer {
        CloudServer {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn unavailable() -> Error {
        Error::api(503, "Service Unavailable", "try again")
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_does_not_sleep() {
        let calls = AtomicUsize::new(0);
        let start = Instant::now();

        let details = wait_for_status(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(Ok(server(ServerStatus::Off)))
            },
            ServerStatus::Off,
            &spec(),
        )
        .await
        .unwrap();

        assert_eq!(details.server_status, ServerStatus::Off);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_eventual_success_sleeps_once_per_mismatch() {
        let calls = AtomicUsize::new(0);
        let start = Instant::now();

        wait_for_status(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                let status = if n < 3 { ServerStatus::On } else { ServerStatus::Off };
                ready(Ok(server(status)))
            },
            ServerStatus::Off,
            &spec(),
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(start.elapsed(), POLL * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_budget_exhaustion_returns_last_error() {
        let calls = AtomicUsize::new(0);
        let start = Instant::now();

        let err = wait_for_status(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                ready(Err::<CloudServerDetails, _>(Error::api(
                    503,
                    "Service Unavailable",
                    format!("attempt {}", n),
                )))
            },
            ServerStatus::Off,
            &spec().with_max_failures(3),
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match err {
            Error::Api { status, message, .. } => {
                assert_eq!(status, 503);
                assert_eq!(message, "attempt 3");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        // Transient failures are retried without sleeping
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_status_spends_failure_budget() {
        let calls = AtomicUsize::new(0);

        let err = wait_for_status(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(Err::<CloudServerDetails, _>(Error::api(404, "Not Found", "")))
            },
            ServerStatus::Off,
            &spec().with_max_failures(4),
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_budget_fails_on_first_error() {
        let calls = AtomicUsize::new(0);

        let result = wait_for_status(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(Err::<CloudServerDetails, _>(unavailable()))
            },
            ServerStatus::Off,
            &spec().with_max_failures(0),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_is_not_refilled_by_success() {
        // fail, ok(ON), fail, ok(ON), fail: with a budget of 2 the third failure is fatal
        let calls = AtomicUsize::new(0);

        let result = wait_for_status(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n % 2 == 0 {
                    ready(Err(unavailable()))
                } else {
                    ready(Ok(server(ServerStatus::On)))
                }
            },
            ServerStatus::Off,
            &spec().with_max_failures(2),
        )
        .await;

        assert!(matches!(result, Err(Error::Api { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_error_is_not_retried() {
        let calls = AtomicUsize::new(0);

        let result = wait_for_status(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(Err::<CloudServerDetails, _>(Error::remote(13, "Server not found")))
            },
            ServerStatus::Off,
            &spec(),
        )
        .await;

        assert!(matches!(result, Err(Error::Remote { code: 13, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_named_entity_appears_after_empty_listings() {
        let calls = AtomicUsize::new(0);
        let start = Instant::now();

        let found = wait_for_named(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                let listing = if n < 2 {
                    vec![]
                } else {
                    vec![listed("other"), listed("X")]
                };
                ready(Ok(listing))
            },
            "X",
            &spec(),
        )
        .await
        .unwrap();

        assert_eq!(found.name, "X");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), POLL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_named_first_match_wins() {
        let found = wait_for_named(
            || {
                let mut first = listed("dup");
                first.server_id = 1;
                let mut second = listed("dup");
                second.server_id = 2;
                ready(Ok(vec![first, second]))
            },
            "dup",
            &spec(),
        )
        .await
        .unwrap();

        assert_eq!(found.server_id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_named_never_matching_keeps_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let spec = spec();
        let wait = wait_for_named(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                ready(Ok(vec![listed("a"), listed("b")]))
            },
            "X",
            &spec,
        );

        // Outer cap: 50 poll intervals
        let outcome = tokio::time::timeout(POLL * 50, wait).await;

        assert!(outcome.is_err(), "a mismatch must never be reported as a match");
        assert!(calls.load(Ordering::SeqCst) >= 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_named_failure_budget() {
        let calls = AtomicUsize::new(0);

        let result = wait_for_named::<_, _, CloudServer>(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                ready(Err(unavailable()))
            },
            "X",
            &spec().with_max_failures(4),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_bounds_the_wait() {
        let result = wait_for_status(
            || ready(Ok(server(ServerStatus::On))),
            ServerStatus::Off,
            &spec().with_deadline(Duration::from_secs(60)),
        )
        .await;

        assert!(matches!(result, Err(Error::Timeout { seconds: 60 })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_the_wait() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(25)).await;
            canceller.cancel();
        });

        let result = wait_for_status(
            || ready(Ok(server(ServerStatus::On))),
            ServerStatus::Off,
            &spec().with_cancellation(token),
        )
        .await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }

    struct ScriptedSource {
        statuses: std::sync::Mutex<Vec<ServerStatus>>,
    }

    #[async_trait]
    impl ServerStateSource for ScriptedSource {
        async fn server_details(&self, server_id: i64) -> Result<CloudServerDetails> {
            let mut statuses = self.statuses.lock().unwrap();
            let status = if statuses.len() > 1 {
                statuses.remove(0)
            } else {
                statuses[0]
            };
            Ok(CloudServerDetails {
                server_id,
                server_status: status,
                ..Default::default()
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_server_status_through_source() {
        let source = ScriptedSource {
            statuses: std::sync::Mutex::new(vec![
                ServerStatus::On,
                ServerStatus::On,
                ServerStatus::Off,
            ]),
        };

        let details = wait_for_server_status(&source, 42, ServerStatus::Off, &spec())
            .await
            .unwrap();

        assert_eq!(details.server_id, 42);
        assert_eq!(details.server_status, ServerStatus::Off);
    }
}
