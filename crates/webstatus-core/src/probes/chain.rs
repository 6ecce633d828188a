//! Ordered fallback chains.
//!
//! A [`ProbeChain`] is a list of named sources sharing one signature. Sources
//! run strictly in insertion order and only until one of them yields a
//! present value, so later (more expensive) sources are never touched when
//! an earlier one answers.

use std::future::Future;
use std::net::IpAddr;

use futures_util::future::BoxFuture;

use super::PROBE_TARGET;
use crate::ports::ProbeResult;

/// Values a chain can return.
pub trait Candidate {
    /// Whether the value counts as an answer. Blank values fall through.
    fn is_present(&self) -> bool;
}

impl Candidate for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Candidate for IpAddr {
    fn is_present(&self) -> bool {
        !self.is_unspecified()
    }
}

/// The winning value and the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHit<T> {
    pub source: &'static str,
    pub value: T,
}

type Source<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, ProbeResult<T>> + Send + 'a>;

/// First-present-wins list of probe sources.
///
/// # Example
///
/// ```ignore
/// let hit = ProbeChain::new("os-name")
///     .then_sync("os-release", || Ok(release.name().map(str::to_string)))
///     .then_sync("uname", || Ok(Some(kernel.name.clone())))
///     .first()
///     .await;
/// ```
pub struct ProbeChain<'a, T> {
    label: &'static str,
    sources: Vec<(&'static str, Source<'a, T>)>,
}

impl<'a, T> ProbeChain<'a, T>
where
    T: Candidate + Send + 'a,
{
    /// Create an empty chain. `label` names the chain in logs.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            sources: Vec::new(),
        }
    }

    /// Append an async source.
    #[must_use]
    pub fn then<F, Fut>(mut self, name: &'static str, source: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = ProbeResult<T>> + Send + 'a,
    {
        let run: Source<'a, T> = Box::new(move || -> BoxFuture<'a, ProbeResult<T>> {
            Box::pin(source())
        });
        self.sources.push((name, run));
        self
    }

    /// Append a synchronous source. It still runs lazily, in order.
    #[must_use]
    pub fn then_sync<F>(self, name: &'static str, source: F) -> Self
    where
        F: FnOnce() -> ProbeResult<T> + Send + 'a,
    {
        self.then(name, move || async move { source() })
    }

    /// Source names in evaluation order.
    pub fn sources(&self) -> Vec<&'static str> {
        self.sources.iter().map(|(name, _)| *name).collect()
    }

    /// Run sources in order and return the first present value.
    ///
    /// Source errors are logged at debug level and treated like an empty
    /// answer.
    pub async fn first(self) -> Option<ProbeHit<T>> {
        let label = self.label;
        for (name, source) in self.sources {
            match source().await {
                Ok(Some(value)) if value.is_present() => {
                    tracing::debug!(target: PROBE_TARGET, chain = label, source = name, "probe answered");
                    return Some(ProbeHit {
                        source: name,
                        value,
                    });
                }
                Ok(_) => {
                    tracing::debug!(target: PROBE_TARGET, chain = label, source = name, "probe had no value, falling back");
                }
                Err(err) => {
                    tracing::debug!(target: PROBE_TARGET, chain = label, source = name, error = %err, "probe failed, falling back");
                }
            }
        }
        tracing::debug!(target: PROBE_TARGET, chain = label, "all probes exhausted");
        None
    }
}
