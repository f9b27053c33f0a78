//! Sequential fallback: try backend candidates in order, stop at the first
//! success, and finish with a mock step when every candidate failed.

use crate::api::RequestError;
use crate::domain::Loaded;
use log::{debug, warn};
use std::future::Future;

/// Runs `attempt` for each candidate in order and returns the first success
/// together with the candidate that produced it, or every failure in order.
pub async fn first_success<'c, T, F, Fut>(
    what: &str,
    candidates: &[&'c str],
    mut attempt: F,
) -> Result<(T, &'c str), Vec<RequestError>>
where
    F: FnMut(&'c str) -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
{
    let mut failures = Vec::with_capacity(candidates.len());

    for &candidate in candidates {
        match attempt(candidate).await {
            Ok(value) => {
                debug!("{what}: served by {candidate}");
                return Ok((value, candidate));
            }
            Err(e) => {
                warn!("{what}: {candidate} failed ({kind}): {e}", kind = e.kind());
                failures.push(e);
            }
        }
    }

    Err(failures)
}

/// [`first_success`] with a terminal mock step; never fails.
pub async fn with_fallback<'c, T, F, Fut, M>(
    what: &str,
    candidates: &[&'c str],
    attempt: F,
    mock: M,
) -> Loaded<T>
where
    F: FnMut(&'c str) -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
    M: FnOnce() -> T,
{
    match first_success(what, candidates, attempt).await {
        Ok((value, source)) => Loaded::real(value, source),
        Err(failures) => {
            warn!(
                "{what}: {} backend attempt(s) failed, substituting mock data",
                failures.len()
            );
            Loaded::mock(mock())
        }
    }
}

/// Single-endpoint form of [`with_fallback`].
pub async fn real_or_mock<T, Fut, M>(what: &str, source: &str, request: Fut, mock: M) -> Loaded<T>
where
    Fut: Future<Output = Result<T, RequestError>>,
    M: FnOnce() -> T,
{
    match request.await {
        Ok(value) => Loaded::real(value, source),
        Err(e) => {
            warn!("{what}: {source} failed ({kind}): {e}; substituting mock data", kind = e.kind());
            Loaded::mock(mock())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Origin;
    use std::sync::Mutex;

    fn status_error(path: &str) -> RequestError {
        RequestError::Status {
            url: path.to_string(),
            status: 503,
        }
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let tried = Mutex::new(Vec::new());
        let result = first_success("test", &["a", "b", "c"], |candidate| {
            tried.lock().unwrap().push(candidate);
            async move {
                if candidate == "b" {
                    Ok(42)
                } else {
                    Err(status_error(candidate))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), (42, "b"));
        assert_eq!(*tried.lock().unwrap(), ["a", "b"]);
    }

    #[tokio::test]
    async fn collects_every_failure_in_order() {
        let failures = first_success("test", &["a", "b"], |candidate| async move {
            Err::<(), _>(status_error(candidate))
        })
        .await
        .unwrap_err();

        let urls: Vec<String> = failures
            .iter()
            .map(|e| match e {
                RequestError::Status { url, .. } => url.clone(),
                other => other.to_string(),
            })
            .collect();
        assert_eq!(urls, ["a", "b"]);
    }

    #[tokio::test]
    async fn mock_step_runs_only_when_all_fail() {
        let loaded = with_fallback("test", &["a"], |_| async { Ok(1) }, || 99).await;
        assert_eq!((loaded.data, loaded.origin, loaded.source.as_str()), (1, Origin::Real, "a"));

        let loaded = with_fallback(
            "test",
            &["a", "b", "c"],
            |candidate| async move { Err::<i32, _>(status_error(candidate)) },
            || 99,
        )
        .await;
        assert_eq!(loaded.data, 99);
        assert!(loaded.is_mock());
    }

    #[tokio::test]
    async fn empty_candidate_list_goes_straight_to_mock() {
        let loaded = with_fallback(
            "test",
            &[],
            |_| std::future::ready(Ok::<i32, RequestError>(1)),
            || 7,
        )
        .await;
        assert_eq!(loaded.data, 7);
    }

    #[tokio::test]
    async fn single_endpoint_fallback() {
        let real = real_or_mock("test", "/x", async { Ok("live") }, || "mock").await;
        assert_eq!(real.source, "/x");

        let mock = real_or_mock("test", "/x", async { Err(status_error("/x")) }, || "mock").await;
        assert_eq!(mock.data, "mock");
        assert_eq!(mock.source, "mock");
    }
}
