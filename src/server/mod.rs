//! Cairn server communication.
//!
//! The boot sequencer and scan talk to the server through the
//! [`ServerServices`] trait; [`ServerManager`] is the blocking-HTTP
//! implementation. A [`ServerConnector`] builds the service handle from the
//! resolved configuration so boot sequencing stays testable without a
//! network.

pub mod mock;

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{options, ScanOptions};
use crate::error::{CairnError, Result};

pub use mock::{MockConnector, MockServer, MockServerState};

/// Operations the rest of the tool needs from the server.
pub trait ServerServices {
    /// Probe the server. Never fails; unreachable is `false`.
    fn test_connection(&self) -> bool;

    /// Require the server to be reachable.
    fn assert_connection(&self) -> Result<()>;

    /// Establish the session: fetch and store registration details.
    fn init(&mut self) -> Result<()>;

    /// Registration id, available after a successful [`ServerServices::init`].
    fn registration_id(&self) -> Option<&str>;

    /// Configured base URL.
    fn base_url(&self) -> &str;
}

/// Builds a server handle from resolved configuration.
pub trait ServerConnector {
    fn connect(&self, options: &ScanOptions) -> Result<Box<dyn ServerServices>>;
}

/// Production connector: blocking HTTP via [`ServerManager`].
pub struct HttpConnector;

impl ServerConnector for HttpConnector {
    fn connect(&self, options: &ScanOptions) -> Result<Box<dyn ServerServices>> {
        Ok(Box::new(ServerManager::from_options(options)?))
    }
}

/// Registration details returned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationInfo {
    registration_id: String,
    #[serde(default)]
    server_version: Option<String>,
}

/// Blocking HTTP client for the Cairn server.
pub struct ServerManager {
    client: reqwest::blocking::Client,
    base_url: String,
    api_token: String,
    registration: Option<RegistrationInfo>,
}

impl ServerManager {
    /// Build a manager from the resolved option set.
    pub fn from_options(options: &ScanOptions) -> Result<Self> {
        let timeout = options.int_value(options::SERVER_TIMEOUT).max(1) as u64;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .danger_accept_invalid_certs(options.bool_value(options::SERVER_TRUST_CERT))
            .build()
            .map_err(|e| CairnError::Integration {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: options.value(options::SERVER_URL).trim_end_matches('/').to_string(),
            api_token: options.value(options::SERVER_API_TOKEN).to_string(),
            registration: None,
        })
    }

    fn get(&self, path: &str) -> reqwest::Result<reqwest::blocking::Response> {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if !self.api_token.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_token));
        }
        request.send()
    }

    fn require_base_url(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(CairnError::Integration {
                message: "no server URL configured (set cairn.server.url or cairn.offline.mode)"
                    .to_string(),
            });
        }
        Ok(())
    }
}

impl ServerServices for ServerManager {
    fn test_connection(&self) -> bool {
        if self.base_url.is_empty() {
            warn!("Connection test failed: no server URL configured");
            return false;
        }
        match self.get("/api/status") {
            Ok(response) if response.status().is_success() => {
                info!("Connection to {} succeeded", self.base_url);
                true
            }
            Ok(response) => {
                warn!(
                    "Connection to {} failed: HTTP {}",
                    self.base_url,
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("Connection to {} failed: {}", self.base_url, e);
                false
            }
        }
    }

    fn assert_connection(&self) -> Result<()> {
        self.require_base_url().map_err(|_| CairnError::Connectivity {
            message: "no server URL configured".to_string(),
        })?;
        let response = self.get("/api/status").map_err(|e| CairnError::Connectivity {
            message: e.to_string(),
        })?;
        if !response.status().is_success() {
            return Err(CairnError::Connectivity {
                message: format!("server answered HTTP {}", response.status()),
            });
        }
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        self.require_base_url()?;
        let response = self
            .get("/api/registration")
            .map_err(|e| CairnError::Integration {
                message: format!("registration fetch failed: {}", e),
            })?;
        if !response.status().is_success() {
            return Err(CairnError::Integration {
                message: format!("registration fetch answered HTTP {}", response.status()),
            });
        }
        let registration: RegistrationInfo =
            response.json().map_err(|e| CairnError::Integration {
                message: format!("malformed registration response: {}", e),
            })?;
        info!(
            "Connected to Cairn server {} (registration {})",
            registration
                .server_version
                .as_deref()
                .unwrap_or("unknown version"),
            registration.registration_id
        );
        self.registration = Some(registration);
        Ok(())
    }

    fn registration_id(&self) -> Option<&str> {
        self.registration.as_ref().map(|r| r.registration_id.as_str())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::{PropertyOrigin, PropertySource};
    use httpmock::{Method::GET, MockServer as HttpMockServer};
    use std::collections::HashMap;

    fn options_with_server(url: &str, extra: &[(&str, &str)]) -> ScanOptions {
        let mut values: HashMap<String, String> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        values.insert(options::SERVER_URL.to_string(), url.to_string());
        let mut source = PropertySource::new();
        source.push_layer(PropertyOrigin::CommandLine, values);
        ScanOptions::load(&source)
    }

    #[test]
    fn test_connection_true_when_status_ok() {
        let server = HttpMockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(200);
        });

        let manager =
            ServerManager::from_options(&options_with_server(&server.base_url(), &[])).unwrap();
        assert!(manager.test_connection());
    }

    #[test]
    fn test_connection_false_when_status_errors() {
        let server = HttpMockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(503);
        });

        let manager =
            ServerManager::from_options(&options_with_server(&server.base_url(), &[])).unwrap();
        assert!(!manager.test_connection());
    }

    #[test]
    fn test_connection_false_without_url() {
        let manager = ServerManager::from_options(&options_with_server("", &[])).unwrap();
        assert!(!manager.test_connection());
    }

    #[test]
    fn assert_connection_maps_to_connectivity_error() {
        let server = HttpMockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(500);
        });

        let manager =
            ServerManager::from_options(&options_with_server(&server.base_url(), &[])).unwrap();
        let err = manager.assert_connection().unwrap_err();
        assert!(matches!(err, CairnError::Connectivity { .. }));
    }

    #[test]
    fn init_stores_registration_details() {
        let server = HttpMockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/registration");
            then.status(200)
                .json_body(serde_json::json!({
                    "registrationId": "reg-42",
                    "serverVersion": "3.1.0"
                }));
        });

        let mut manager =
            ServerManager::from_options(&options_with_server(&server.base_url(), &[])).unwrap();
        manager.init().unwrap();
        assert_eq!(manager.registration_id(), Some("reg-42"));
    }

    #[test]
    fn init_sends_bearer_token_when_configured() {
        let server = HttpMockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/registration")
                .header("Authorization", "Bearer tok-123");
            then.status(200)
                .json_body(serde_json::json!({ "registrationId": "reg-1" }));
        });

        let mut manager = ServerManager::from_options(&options_with_server(
            &server.base_url(),
            &[(options::SERVER_API_TOKEN, "tok-123")],
        ))
        .unwrap();
        manager.init().unwrap();
        mock.assert();
    }

    #[test]
    fn init_without_url_is_integration_error() {
        let mut manager = ServerManager::from_options(&options_with_server("", &[])).unwrap();
        let err = manager.init().unwrap_err();
        assert!(matches!(err, CairnError::Integration { .. }));
    }

    #[test]
    fn init_on_malformed_body_is_integration_error() {
        let server = HttpMockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/registration");
            then.status(200).body("not json");
        });

        let mut manager =
            ServerManager::from_options(&options_with_server(&server.base_url(), &[])).unwrap();
        let err = manager.init().unwrap_err();
        assert!(matches!(err, CairnError::Integration { .. }));
        assert!(manager.registration_id().is_none());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let manager = ServerManager::from_options(&options_with_server(
            "https://cairn.example.com/",
            &[],
        ))
        .unwrap();
        assert_eq!(manager.base_url(), "https://cairn.example.com");
    }
}
