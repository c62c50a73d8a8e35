//! Mock server services for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::ScanOptions;
use crate::error::{CairnError, Result};

use super::{ServerConnector, ServerServices};

/// Shared call counters, kept alive by the test while boot owns the mock.
#[derive(Debug, Clone, Default)]
pub struct MockServerState {
    connect_calls: Arc<AtomicUsize>,
    test_connection_calls: Arc<AtomicUsize>,
    assert_connection_calls: Arc<AtomicUsize>,
    init_calls: Arc<AtomicUsize>,
}

impl MockServerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn test_connection_calls(&self) -> usize {
        self.test_connection_calls.load(Ordering::SeqCst)
    }

    pub fn assert_connection_calls(&self) -> usize {
        self.assert_connection_calls.load(Ordering::SeqCst)
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

/// Scripted [`ServerServices`] implementation.
pub struct MockServer {
    state: MockServerState,
    reachable: bool,
    init_fails: bool,
    registration_id: Option<String>,
    base_url: String,
}

impl MockServer {
    pub fn new(state: MockServerState) -> Self {
        Self {
            state,
            reachable: true,
            init_fails: false,
            registration_id: None,
            base_url: "https://cairn.test".to_string(),
        }
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.init_fails = true;
        self
    }
}

impl ServerServices for MockServer {
    fn test_connection(&self) -> bool {
        self.state
            .test_connection_calls
            .fetch_add(1, Ordering::SeqCst);
        self.reachable
    }

    fn assert_connection(&self) -> Result<()> {
        self.state
            .assert_connection_calls
            .fetch_add(1, Ordering::SeqCst);
        if self.reachable {
            Ok(())
        } else {
            Err(CairnError::Connectivity {
                message: "mock server unreachable".to_string(),
            })
        }
    }

    fn init(&mut self) -> Result<()> {
        self.state.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.init_fails {
            return Err(CairnError::Integration {
                message: "mock init failure".to_string(),
            });
        }
        self.registration_id = Some("mock-registration".to_string());
        Ok(())
    }

    fn registration_id(&self) -> Option<&str> {
        self.registration_id.as_deref()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Connector handing out scripted [`MockServer`] instances.
pub struct MockConnector {
    state: MockServerState,
    reachable: bool,
    init_fails: bool,
}

impl MockConnector {
    pub fn new(state: MockServerState) -> Self {
        Self {
            state,
            reachable: true,
            init_fails: false,
        }
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.init_fails = true;
        self
    }
}

impl ServerConnector for MockConnector {
    fn connect(&self, _options: &ScanOptions) -> Result<Box<dyn ServerServices>> {
        self.state.connect_calls.fetch_add(1, Ordering::SeqCst);
        let mut server = MockServer::new(self.state.clone());
        server.reachable = self.reachable;
        server.init_fails = self.init_fails;
        Ok(Box::new(server))
    }
}
