//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - [`FakeDirectory`] never touches the network
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

#[allow(unused_imports)]
pub use claims_engine::testing::{load_fixture, load_fixture_bytes};
#[allow(unused_imports)]
pub use claims_engine::{
    DirectoryConnector, DirectoryEntry, DirectoryError, MetricsCollector, ResolutionEngine,
    SearchRequest,
};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use claims_config::{CloudConfig, Config, DirectoryConfig, DirectoryLocation, Strategy};

pub const OBJECT_ID: &str = "00aa00aa-bb11-cc22-dd33-44ee44ee44ee";
pub const CORRELATION_ID: &str = "f3b0c6a2-6d1e-4c55-9c1b-8d2f0e6a7b10";
pub const TENANT_ID: &str = "30a4b2c7-5e21-4d8f-9a63-0c1e7f2b8d45";
pub const CLIENT_ID: &str = "8c2f4d1e-7a3b-4e59-b6d0-2f91c8e4a7b3";
pub const CLIENT_SECRET: &str = "super-secret-client-value";
pub const BIND_PASSWORD: &str = "super-secret-bind-password";

/// In-memory directory that counts searches and remembers the last filter.
#[derive(Default)]
pub struct FakeDirectory {
    entries: Vec<DirectoryEntry>,
    failure: Option<fn() -> DirectoryError>,
    calls: AtomicUsize,
    last_filter: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl FakeDirectory {
    pub fn with_entries(entries: Vec<DirectoryEntry>) -> Arc<Self> {
        Arc::new(Self {
            entries,
            ..Default::default()
        })
    }

    pub fn failing(failure: fn() -> DirectoryError) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(failure),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_filter(&self) -> Option<String> {
        self.last_filter.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryConnector for FakeDirectory {
    async fn search(
        &self,
        request: &SearchRequest<'_>,
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filter.lock().unwrap() = Some(request.filter.clone());
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(self.entries.clone()),
        }
    }
}

/// A user entry with `sAMAccountName` and `userPrincipalName`.
#[allow(dead_code)]
pub fn user_entry(sam: &str, upn: &str) -> DirectoryEntry {
    DirectoryEntry::new(format!("CN={sam},OU=People,DC=contoso,DC=com"))
        .with_attr("sAMAccountName", sam)
        .with_attr("userPrincipalName", upn)
}

/// Cloud config pointing both login and graph hosts at `server`.
#[allow(dead_code)]
pub fn cloud_config(server: &MockServer) -> Config {
    Config {
        strategy: Strategy::CloudByObjectId,
        cloud: CloudConfig {
            client_id: Some(CLIENT_ID.to_string()),
            client_secret: Some(SecretString::new(CLIENT_SECRET.to_string().into())),
            tenant_id: Some(TENANT_ID.to_string()),
            environment_name: Some("AzurePublicCloud".to_string()),
            login_base_url: Some(server.uri()),
            graph_base_url: Some(server.uri()),
        },
        ..Default::default()
    }
}

/// Complete on-prem config for `strategy`.
#[allow(dead_code)]
pub fn on_prem_config(strategy: Strategy) -> Config {
    Config {
        strategy,
        directory: DirectoryConfig {
            location: Some(DirectoryLocation {
                url: "ldap://dc01.contoso.com:389".to_string(),
                base_dn: "DC=contoso,DC=com".to_string(),
            }),
            bind_username: Some("svc-claims@contoso.com".to_string()),
            bind_password: Some(SecretString::new(BIND_PASSWORD.to_string().into())),
        },
        ..Default::default()
    }
}

/// Engine over `config` and `directory`, with a short timeout.
#[allow(dead_code)]
pub fn engine(mut config: Config, directory: Arc<FakeDirectory>) -> ResolutionEngine {
    config.connection.timeout = Duration::from_secs(2);
    ResolutionEngine::builder()
        .from_config(Arc::new(config))
        .connector(directory)
        .metrics(MetricsCollector::disabled())
        .build()
        .unwrap()
}
