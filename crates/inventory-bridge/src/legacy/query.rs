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

//! Query-string marshalling for legacy backend calls
//!
//! Every legacy operation is one GET whose query string carries the service
//! credentials, a `func` discriminator and the method-specific fields.
//! Structured fields are embedded as canonical JSON text (serde_json of the
//! typed message, camelCase keys); scalars pass through verbatim.

use crate::config::ConnectionConfig;
use crate::error::{BridgeError, BridgeResult};
use serde::Serialize;

/// The query parameter set for one legacy backend call.
#[derive(Debug, Clone)]
pub struct LegacyQuery {
    func: &'static str,
    fields: Vec<(&'static str, String)>,
}

impl LegacyQuery {
    /// Start a query for the given `func` discriminator.
    pub fn new(func: &'static str) -> Self {
        Self { func, fields: Vec::new() }
    }

    /// The operation this query invokes on the backend.
    pub fn func(&self) -> &'static str {
        self.func
    }

    /// Add a scalar field, passed through verbatim.
    pub fn field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// Add a structured field as its canonical JSON text.
    ///
    /// An absent sub-message serializes as JSON `null`.
    pub fn json_field<T: Serialize>(mut self, key: &'static str, value: &T) -> BridgeResult<Self> {
        let text = serde_json::to_string(value).map_err(|source| BridgeError::Encode { field: key, source })?;
        self.fields.push((key, text));
        Ok(self)
    }

    /// Produce the complete ordered parameter list for the request.
    ///
    /// The fixed fields `service`, `email`, `encrypted` and `func` come
    /// first; method fields are merged on top with last-write-wins on key
    /// collision. No method mapping collides with a fixed field today, but
    /// the merge order is part of the backend contract.
    pub fn into_params(self, config: &ConnectionConfig) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("service".to_string(), config.service.clone()),
            ("email".to_string(), config.client_id.clone()),
            ("encrypted".to_string(), config.client_secret.clone()),
            ("func".to_string(), self.func.to_string()),
        ];

        for (key, value) in self.fields {
            match params.iter_mut().find(|(existing, _)| existing == key) {
                Some(entry) => entry.1 = value,
                None => params.push((key.to_string(), value)),
            }
        }

        params
    }
}
