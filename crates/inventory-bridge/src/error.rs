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

//! Error handling for the bridge
//!
//! Every failure between the plugin surface and the legacy backend is a
//! `BridgeError`, and every `BridgeError` maps to exactly one gRPC status.
//! A call therefore always terminates with an explicit response, an error
//! status, or a closed stream; nothing is left hanging.

use reqwest::StatusCode;
use thiserror::Error;
use tonic::Status;
use tracing::warn;

/// Failures raised while translating a plugin call into a legacy request
/// and its JSON response back.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("missing connection parameter {parameter}")]
    MissingParameter { parameter: &'static str },

    #[error("invalid backend address {address}: {message}")]
    Address { address: String, message: String },

    #[error("failed to encode query field {field} as JSON: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}")]
    BackendStatus { status: StatusCode },

    #[error("backend returned a body that is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("backend response was not {expected}")]
    Contract { expected: &'static str },
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

impl From<BridgeError> for Status {
    fn from(error: BridgeError) -> Self {
        let message = error.to_string();

        match &error {
            // The caller supplied an unusable connection parameter set.
            BridgeError::MissingParameter { .. } | BridgeError::Address { .. } => Status::failed_precondition(message),

            BridgeError::Encode { .. } => Status::internal(message),

            BridgeError::Transport(source) => {
                if source.is_timeout() {
                    Status::deadline_exceeded(message)
                } else {
                    Status::unavailable(message)
                }
            }

            BridgeError::BackendStatus { status } => backend_status_to_grpc(*status, message),

            // The backend broke its JSON contract.
            BridgeError::Decode(_) | BridgeError::Contract { .. } => Status::internal(message),
        }
    }
}

/// Map a non-2xx backend HTTP status onto the closest gRPC status.
fn backend_status_to_grpc(status: StatusCode, message: String) -> Status {
    match status {
        StatusCode::BAD_REQUEST => Status::invalid_argument(message),
        StatusCode::UNAUTHORIZED => Status::unauthenticated(message),
        StatusCode::FORBIDDEN => Status::permission_denied(message),
        StatusCode::NOT_FOUND => Status::not_found(message),
        StatusCode::CONFLICT => Status::already_exists(message),
        StatusCode::TOO_MANY_REQUESTS => Status::resource_exhausted(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Status::deadline_exceeded(message),
        StatusCode::NOT_IMPLEMENTED => Status::unimplemented(message),
        _ if status.is_server_error() => Status::unavailable(message),
        _ => {
            warn!("Unmapped backend HTTP status: {}", status);
            Status::unknown(format!("HTTP {}: {}", status.as_u16(), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn missing_parameter_maps_to_failed_precondition() {
        let status: Status = BridgeError::MissingParameter { parameter: "API_HOST" }.into();
        assert_eq!(status.code(), Code::FailedPrecondition);
        assert!(status.message().contains("API_HOST"));
    }

    #[test]
    fn bad_address_maps_to_failed_precondition() {
        let status: Status = BridgeError::Address {
            address: "https://example.com:nope/api".to_string(),
            message: "invalid port number".to_string(),
        }
        .into();
        assert_eq!(status.code(), Code::FailedPrecondition);
    }

    #[test]
    fn contract_violations_map_to_internal() {
        let status: Status = BridgeError::Contract { expected: "a JSON array" }.into();
        assert_eq!(status.code(), Code::Internal);
        assert!(status.message().contains("a JSON array"));
    }

    #[test]
    fn backend_status_mapping() {
        let cases = [
            (StatusCode::BAD_REQUEST, Code::InvalidArgument),
            (StatusCode::UNAUTHORIZED, Code::Unauthenticated),
            (StatusCode::NOT_FOUND, Code::NotFound),
            (StatusCode::GATEWAY_TIMEOUT, Code::DeadlineExceeded),
            (StatusCode::INTERNAL_SERVER_ERROR, Code::Unavailable),
            (StatusCode::IM_A_TEAPOT, Code::Unknown),
        ];

        for (http, grpc) in cases {
            let status: Status = BridgeError::BackendStatus { status: http }.into();
            assert_eq!(status.code(), grpc, "for HTTP {http}");
        }
    }
}
