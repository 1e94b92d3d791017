use crate::{Error, Item, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Interval between polls which don't set one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll repeatedly fetches a resource until its body satisfies a predicate,
/// or until the server answers with one of the expected statuses.
pub struct Poll<T> {
    item: Item<T>,
    interval: Duration,
    timeout: Option<Duration>,
    statuses: Vec<reqwest::StatusCode>,
    predicate: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T: DeserializeOwned> Poll<T> {
    pub(crate) fn new(item: Item<T>) -> Self {
        Self {
            item,
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            statuses: Vec::new(),
            predicate: None,
        }
    }

    pub fn interval(self, interval: Duration) -> Self {
        Self { interval, ..self }
    }

    /// Bounds the total time spent polling.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Stops polling when the server answers with `status`, which may be
    /// an error status such as `404 Not Found` after a deletion.
    pub fn status(mut self, status: reqwest::StatusCode) -> Self {
        self.statuses.push(status);
        self
    }

    /// Stops polling when `predicate` accepts the fetched body.
    pub fn predicate<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Some(Box::new(predicate)),
            ..self
        }
    }

    /// Polls until a condition is met. The body of the returned response
    /// is None if polling ended on an error status.
    ///
    /// Without a predicate or an expected status, the first successful
    /// fetch ends the poll.
    pub async fn start(self) -> Result<Response<Option<T>>, Error> {
        let started = std::time::Instant::now();

        match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.poll_loop()).await {
                Ok(outcome) => outcome,
                Err(_elapsed) => Err(Error::Timeout {
                    path: self.item.path().to_string(),
                    elapsed: started.elapsed(),
                }),
            },
            None => self.poll_loop().await,
        }
    }

    async fn poll_loop(&self) -> Result<Response<Option<T>>, Error> {
        loop {
            match self.item.get().await {
                Ok(Response { status, body }) => {
                    let done = self.statuses.contains(&status)
                        || match &self.predicate {
                            Some(predicate) => predicate(&body),
                            None => self.statuses.is_empty(),
                        };
                    if done {
                        return Ok(Response {
                            status,
                            body: Some(body),
                        });
                    }
                    tracing::debug!(path = self.item.path(), %status, "polled resource");
                }
                Err(Error::Api(err)) if self.statuses.contains(&err.status) => {
                    tracing::debug!(path = self.item.path(), status = %err.status, "polled resource");
                    return Ok(Response {
                        status: err.status,
                        body: None,
                    });
                }
                Err(err) => return Err(err),
            }
            () = tokio::time::sleep(self.interval).await;
        }
    }
}
