//! Simulated backend behavior.
//!
//! The store is local, but the client treats it like a remote service:
//! every operation waits out a configurable latency and can be made to
//! fail on demand. Tests run with zero latency and inject failures
//! deterministically; nothing in the client sleeps on its own.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use super::ApiError;

/// Delay for list reads, mirroring the original front end.
const LIST_DELAY_MS: u64 = 500;
/// Delay for single-story reads.
const DETAIL_DELAY_MS: u64 = 300;
/// Delay for the category catalog.
const CATEGORIES_DELAY_MS: u64 = 300;
/// Delay for story creation, the slowest call in the original.
const CREATE_DELAY_MS: u64 = 800;
/// Delay for story updates.
const UPDATE_DELAY_MS: u64 = 600;
/// Delay for story deletion.
const DELETE_DELAY_MS: u64 = 500;

/// Operation families, used to scope latency and planned faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListStories,
    GetStory,
    ListCategories,
    CreateStory,
    UpdateStory,
    DeleteStory,
}

/// Per-operation artificial latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub detail: Duration,
    pub categories: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl LatencyProfile {
    /// The delays the original front end simulated per endpoint.
    pub fn realistic() -> Self {
        Self {
            list: Duration::from_millis(LIST_DELAY_MS),
            detail: Duration::from_millis(DETAIL_DELAY_MS),
            categories: Duration::from_millis(CATEGORIES_DELAY_MS),
            create: Duration::from_millis(CREATE_DELAY_MS),
            update: Duration::from_millis(UPDATE_DELAY_MS),
            delete: Duration::from_millis(DELETE_DELAY_MS),
        }
    }

    /// No artificial delay anywhere; the profile tests run with.
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// The same delay for every operation.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            detail: delay,
            categories: delay,
            create: delay,
            update: delay,
            delete: delay,
        }
    }

    pub fn for_operation(&self, operation: Operation) -> Duration {
        match operation {
            Operation::ListStories => self.list,
            Operation::GetStory => self.detail,
            Operation::ListCategories => self.categories,
            Operation::CreateStory => self.create,
            Operation::UpdateStory => self.update,
            Operation::DeleteStory => self.delete,
        }
    }
}

/// A failure planned for a future operation.
#[derive(Debug)]
struct PlannedFault {
    operation: Operation,
    error: ApiError,
}

/// Injectable latency/fault strategy standing in for a remote backend.
///
/// Faults are consumed in the order they were queued, each by the first
/// matching operation, then the backend behaves normally again.
#[derive(Debug)]
pub struct Simulation {
    latency: LatencyProfile,
    faults: Mutex<VecDeque<PlannedFault>>,
}

impl Simulation {
    /// Original-front-end latency, no planned faults.
    pub fn realistic() -> Self {
        Self::with_latency(LatencyProfile::realistic())
    }

    /// Zero latency, no planned faults.
    pub fn instant() -> Self {
        Self::with_latency(LatencyProfile::none())
    }

    pub fn with_latency(latency: LatencyProfile) -> Self {
        Self {
            latency,
            faults: Mutex::new(VecDeque::new()),
        }
    }

    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    /// Queue a failure for the next occurrence of an operation.
    pub fn inject_fault(&self, operation: Operation, error: ApiError) {
        debug!(operation = ?operation, %error, "Planned fault");
        self.lock_faults().push_back(PlannedFault { operation, error });
    }

    /// Number of faults still waiting to fire.
    pub fn pending_faults(&self) -> usize {
        self.lock_faults().len()
    }

    /// Wait out the operation's latency, then surface a planned fault if
    /// one matches. Runs before the store is touched.
    pub(crate) async fn apply(&self, operation: Operation) -> Result<(), ApiError> {
        let delay = self.latency.for_operation(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.take_fault(operation) {
            debug!(operation = ?operation, %error, "Injected fault");
            return Err(error);
        }
        Ok(())
    }

    fn take_fault(&self, operation: Operation) -> Option<ApiError> {
        let mut faults = self.lock_faults();
        let index = faults.iter().position(|fault| fault.operation == operation)?;
        faults.remove(index).map(|fault| fault.error)
    }

    fn lock_faults(&self) -> MutexGuard<'_, VecDeque<PlannedFault>> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::realistic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realistic_profile_matches_original_delays() {
        let profile = LatencyProfile::realistic();
        assert_eq!(profile.list, Duration::from_millis(500));
        assert_eq!(profile.detail, Duration::from_millis(300));
        assert_eq!(profile.create, Duration::from_millis(800));
        assert_eq!(profile.update, Duration::from_millis(600));
        assert_eq!(profile.for_operation(Operation::DeleteStory), Duration::from_millis(500));
    }

    #[test]
    fn test_none_profile_is_all_zero() {
        let profile = LatencyProfile::none();
        for operation in [
            Operation::ListStories,
            Operation::GetStory,
            Operation::ListCategories,
            Operation::CreateStory,
            Operation::UpdateStory,
            Operation::DeleteStory,
        ] {
            assert!(profile.for_operation(operation).is_zero());
        }
    }

    #[tokio::test]
    async fn test_fault_fires_once_for_its_operation() {
        let sim = Simulation::instant();
        sim.inject_fault(
            Operation::CreateStory,
            ApiError::Transient("write failed".to_string()),
        );
        assert_eq!(sim.pending_faults(), 1);

        // Different operation passes and leaves the fault queued
        sim.apply(Operation::ListStories).await.unwrap();
        assert_eq!(sim.pending_faults(), 1);

        let err = sim.apply(Operation::CreateStory).await.unwrap_err();
        assert!(err.is_transient());

        // Consumed: the next create passes
        sim.apply(Operation::CreateStory).await.unwrap();
        assert_eq!(sim.pending_faults(), 0);
    }

    #[tokio::test]
    async fn test_faults_fire_in_queue_order() {
        let sim = Simulation::instant();
        sim.inject_fault(Operation::GetStory, ApiError::Transient("first".to_string()));
        sim.inject_fault(Operation::GetStory, ApiError::Transient("second".to_string()));

        let first = sim.apply(Operation::GetStory).await.unwrap_err();
        assert_eq!(first.to_string(), "Transient failure: first");
        let second = sim.apply(Operation::GetStory).await.unwrap_err();
        assert_eq!(second.to_string(), "Transient failure: second");
    }

    #[tokio::test]
    async fn test_instant_simulation_does_not_sleep() {
        let sim = Simulation::instant();
        let started = std::time::Instant::now();
        sim.apply(Operation::CreateStory).await.unwrap();
        // Generous bound; without a sleep this is microseconds
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
