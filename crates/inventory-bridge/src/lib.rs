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

//! Inventory plugin bridge
//!
//! Serves the travel-inventory plugin gRPC contract and fulfills every call
//! with a single HTTP GET against a legacy query-string backend, translating
//! the JSON response back into the RPC response shape.

pub mod config;
pub mod error;
pub mod json;
pub mod legacy;
pub mod services;

pub mod proto {
    tonic::include_proto!("inventory.plugin");

    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("plugin_api_descriptor");
}
