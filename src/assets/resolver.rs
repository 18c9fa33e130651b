//! Ordered fallback chains: try each candidate location until one loads.

use std::future::Future;

use crate::error::VantageError;

/// Candidate locations consumed left to right. Blank entries are dropped
/// on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOrder {
    candidates: Vec<String>,
}

impl LoadOrder {
    /// Build a load order, skipping empty or whitespace-only entries.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates
                .into_iter()
                .map(Into::into)
                .filter(|c: &String| !c.trim().is_empty())
                .collect(),
        }
    }

    /// Remaining candidates in priority order.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// `true` if nothing is left to try.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// The first candidate that loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// Location that succeeded.
    pub location: String,
    /// Loaded value.
    pub value: T,
    /// How many candidates were tried, including the winner.
    pub attempts: usize,
}

/// Try `attempt` on each candidate in order and return the first success.
///
/// Attempts run one after another; a failure is logged and the next
/// candidate is tried. Nothing past the first success is touched. When
/// every candidate fails the error carries the number of attempts.
pub async fn resolve_first<T, F, Fut>(
    order: LoadOrder,
    mut attempt: F,
) -> Result<Resolved<T>, VantageError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, VantageError>>,
{
    if order.is_empty() {
        return Err(VantageError::NoCandidates);
    }

    let total = order.len();
    for (idx, location) in order.candidates.into_iter().enumerate() {
        log::info!("loading {location} ({}/{total})", idx + 1);
        match attempt(location.clone()).await {
            Ok(value) => {
                return Ok(Resolved {
                    location,
                    value,
                    attempts: idx + 1,
                });
            }
            Err(e) => {
                log::warn!("failed to load {location}: {e}");
            }
        }
    }

    Err(VantageError::AllCandidatesFailed { attempts: total })
}
