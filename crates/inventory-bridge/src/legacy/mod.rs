// Inventory Bridge
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Legacy backend client
//!
//! One operation: issue a single HTTP GET carrying the marshalled query
//! string and hand back the parsed JSON body. No retries; failures surface
//! as explicit errors at this one point.

pub mod query;

pub use query::LegacyQuery;

use crate::config::ConnectionConfig;
use crate::error::{BridgeError, BridgeResult};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// User agent sent with every backend request.
pub const USER_AGENT: &str = concat!("inventory-bridge/", env!("CARGO_PKG_VERSION"));

/// Default bound on a single backend request.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// The seam between the method handlers and the legacy HTTP backend.
#[async_trait]
pub trait LegacyBackend: Send + Sync + 'static {
    /// Perform one legacy call against the given connection configuration
    /// and return the parsed JSON response body.
    async fn fetch(&self, config: &ConnectionConfig, query: LegacyQuery) -> BridgeResult<JsonValue>;
}

/// Production backend client over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpLegacyClient {
    http: reqwest::Client,
}

impl HttpLegacyClient {
    /// Build a client whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> BridgeResult<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl LegacyBackend for HttpLegacyClient {
    async fn fetch(&self, config: &ConnectionConfig, query: LegacyQuery) -> BridgeResult<JsonValue> {
        let url = config.base_url()?;
        let func = query.func();
        let params = query.into_params(config);

        debug!("Requesting func {} from {}", func, url);

        let response = self.http.get(url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::BackendStatus { status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(BridgeError::Decode)
    }
}
