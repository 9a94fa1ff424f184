//! Scripted in-memory implementation of the simulation service adapter.
//!
//! Serves canned responses from per-operation queues and records every
//! call, so tests (and offline runs) can drive the control loop without a
//! live service and assert exactly which adapter operations were issued.
//! An optional artificial step delay makes in-flight-step races
//! reproducible under tokio's paused test clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sweepsim_types::{SimulationConfig, SimulationDescriptor, Snapshot};

use crate::error::ServiceError;

/// One recorded adapter call, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCall {
    /// A create round trip.
    Create,
    /// A step round trip.
    Step,
    /// A state fetch round trip.
    FetchState,
    /// A reset round trip.
    Reset,
}

/// Queues and call log shared by all clones of a [`ScriptedService`].
struct ScriptState {
    /// Responses served by create and reset, in order.
    descriptors: VecDeque<Result<SimulationDescriptor, ServiceError>>,
    /// Responses served by state fetches, in order.
    states: VecDeque<Result<Snapshot, ServiceError>>,
    /// Responses served by steps, in order.
    steps: VecDeque<Result<Snapshot, ServiceError>>,
    /// Every call issued against this service, in order.
    calls: Vec<ServiceCall>,
    /// Artificial latency applied to step responses.
    step_delay: Option<Duration>,
}

/// In-memory stand-in for the remote simulation service.
///
/// Clones share the same queues and call log.
#[derive(Clone)]
pub struct ScriptedService {
    inner: Arc<Mutex<ScriptState>>,
}

impl ScriptedService {
    /// Create a scripted service with empty queues.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScriptState {
                descriptors: VecDeque::new(),
                states: VecDeque::new(),
                steps: VecDeque::new(),
                calls: Vec::new(),
                step_delay: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the next response for create/reset.
    pub fn enqueue_descriptor(&self, result: Result<SimulationDescriptor, ServiceError>) {
        self.lock().descriptors.push_back(result);
    }

    /// Queue the next response for a state fetch.
    pub fn enqueue_state(&self, result: Result<Snapshot, ServiceError>) {
        self.lock().states.push_back(result);
    }

    /// Queue the next response for a step.
    pub fn enqueue_step(&self, result: Result<Snapshot, ServiceError>) {
        self.lock().steps.push_back(result);
    }

    /// Delay every step response by `delay` (tokio virtual time applies).
    pub fn set_step_delay(&self, delay: Duration) {
        self.lock().step_delay = Some(delay);
    }

    /// All calls issued so far, in order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    /// How many calls of `kind` were issued so far.
    pub fn call_count(&self, kind: ServiceCall) -> usize {
        self.lock().calls.iter().filter(|c| **c == kind).count()
    }

    /// Serve the next create response.
    pub(crate) async fn create(
        &self,
        _config: &SimulationConfig,
    ) -> Result<SimulationDescriptor, ServiceError> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::Create);
        state.descriptors.pop_front().unwrap_or_else(|| exhausted("create"))
    }

    /// Serve the next step response, after the configured delay.
    pub(crate) async fn step(&self) -> Result<Snapshot, ServiceError> {
        let (response, delay) = {
            let mut state = self.lock();
            state.calls.push(ServiceCall::Step);
            let response = state.steps.pop_front().unwrap_or_else(|| exhausted("step"));
            (response, state.step_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }

    /// Serve the next state-fetch response.
    pub(crate) async fn fetch_state(&self) -> Result<Snapshot, ServiceError> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::FetchState);
        state.states.pop_front().unwrap_or_else(|| exhausted("state"))
    }

    /// Serve the next reset response.
    pub(crate) async fn reset(
        &self,
        _config: &SimulationConfig,
    ) -> Result<SimulationDescriptor, ServiceError> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::Reset);
        state.descriptors.pop_front().unwrap_or_else(|| exhausted("reset"))
    }
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self::new()
    }
}

/// The error served when a response queue runs dry.
fn exhausted<T>(operation: &str) -> Result<T, ServiceError> {
    Err(ServiceError::ServiceUnavailable(format!(
        "scripted response queue for {operation} is empty"
    )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sweepsim_types::CellTag;

    fn snapshot(turns: u64) -> Snapshot {
        Snapshot {
            grid: vec![vec![CellTag::Base]],
            robots: Vec::new(),
            trash_remaining: 0,
            turns_elapsed: turns,
            is_finished: false,
        }
    }

    #[tokio::test]
    async fn steps_serve_in_queue_order() {
        let service = ScriptedService::new();
        service.enqueue_step(Ok(snapshot(1)));
        service.enqueue_step(Ok(snapshot(2)));

        let first = service.step().await.unwrap();
        let second = service.step().await.unwrap();
        assert_eq!(first.turns_elapsed, 1);
        assert_eq!(second.turns_elapsed, 2);
    }

    #[tokio::test]
    async fn exhausted_queue_reports_unavailable() {
        let service = ScriptedService::new();
        let result = service.step().await;
        assert!(matches!(
            result,
            Err(ServiceError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let service = ScriptedService::new();
        service.enqueue_step(Ok(snapshot(1)));
        let _ = service.step().await;
        let _ = service.fetch_state().await;

        assert_eq!(
            service.calls(),
            vec![ServiceCall::Step, ServiceCall::FetchState]
        );
        assert_eq!(service.call_count(ServiceCall::Step), 1);
        assert_eq!(service.call_count(ServiceCall::Create), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn step_delay_defers_the_response() {
        let service = ScriptedService::new();
        service.set_step_delay(Duration::from_secs(2));
        service.enqueue_step(Ok(snapshot(1)));

        let start = tokio::time::Instant::now();
        let result = service.step().await;
        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
