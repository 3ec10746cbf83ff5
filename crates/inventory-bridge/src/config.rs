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

//! Call-scoped backend connection configuration
//!
//! Every backend-calling request carries the connection parameters of the
//! legacy service it should be fulfilled against. The configuration is
//! derived fresh from each call's parameter list and passed by value, so
//! concurrent calls can never observe each other's credentials.

use crate::error::BridgeError;
use crate::proto::PluginConfigurationParameterValue;
use url::Url;

/// Parameter name carrying the backend URL scheme, e.g. "https".
pub const PARAM_SCHEME: &str = "API_SCHEME";
/// Parameter name carrying the backend host, e.g. "example.com".
pub const PARAM_HOST: &str = "API_HOST";
/// Parameter name carrying the backend port.
pub const PARAM_PORT: &str = "API_PORT";
/// Parameter name carrying the request path, e.g. "api".
pub const PARAM_PATH: &str = "API_PATH";
/// Parameter name carrying the backend service identifier.
pub const PARAM_SERVICE: &str = "API_SERVICE";
/// Parameter name carrying the client id credential.
pub const PARAM_CLIENT_ID: &str = "API_CLIENT_ID";
/// Parameter name carrying the client secret credential.
pub const PARAM_CLIENT_SECRET: &str = "API_CLIENT_SECRET";

/// The configuration fields a parameter name can populate.
///
/// Unknown parameter names map to `None` and are ignored by contract, not by
/// switch fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigField {
    Scheme,
    Host,
    Port,
    Path,
    Service,
    ClientId,
    ClientSecret,
}

impl ConfigField {
    fn from_parameter_name(name: &str) -> Option<Self> {
        match name {
            PARAM_SCHEME => Some(Self::Scheme),
            PARAM_HOST => Some(Self::Host),
            PARAM_PORT => Some(Self::Port),
            PARAM_PATH => Some(Self::Path),
            PARAM_SERVICE => Some(Self::Service),
            PARAM_CLIENT_ID => Some(Self::ClientId),
            PARAM_CLIENT_SECRET => Some(Self::ClientSecret),
            _ => None,
        }
    }
}

/// Connection parameters for one legacy backend call.
///
/// Values are kept verbatim as supplied by the caller; the port in
/// particular is not required to be numeric here. A bad value surfaces as an
/// explicit address error when the URL is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub scheme: String,
    pub host: String,
    pub port: String,
    pub path: String,
    pub service: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ConnectionConfig {
    /// Derive a configuration from a call's parameter list.
    ///
    /// Recognized names populate their field, the last occurrence winning;
    /// everything else is ignored.
    pub fn from_parameters(parameters: &[PluginConfigurationParameterValue]) -> Self {
        let mut config = Self::default();

        for parameter in parameters {
            match ConfigField::from_parameter_name(&parameter.name) {
                Some(ConfigField::Scheme) => config.scheme = parameter.value.clone(),
                Some(ConfigField::Host) => config.host = parameter.value.clone(),
                Some(ConfigField::Port) => config.port = parameter.value.clone(),
                Some(ConfigField::Path) => config.path = parameter.value.clone(),
                Some(ConfigField::Service) => config.service = parameter.value.clone(),
                Some(ConfigField::ClientId) => config.client_id = parameter.value.clone(),
                Some(ConfigField::ClientSecret) => config.client_secret = parameter.value.clone(),
                None => {}
            }
        }

        config
    }

    /// Fail if any connection parameter is still missing or empty.
    ///
    /// Checked before a legacy request is marshalled, so the caller gets a
    /// named parameter in the error instead of a malformed request.
    pub fn ensure_complete(&self) -> Result<(), BridgeError> {
        let fields = [
            (PARAM_SCHEME, &self.scheme),
            (PARAM_HOST, &self.host),
            (PARAM_PORT, &self.port),
            (PARAM_PATH, &self.path),
            (PARAM_SERVICE, &self.service),
            (PARAM_CLIENT_ID, &self.client_id),
            (PARAM_CLIENT_SECRET, &self.client_secret),
        ];

        for (name, value) in fields {
            if value.is_empty() {
                return Err(BridgeError::MissingParameter { parameter: name });
            }
        }

        Ok(())
    }

    /// Render the backend base URL as `{scheme}://{host}:{port}/{path}`.
    ///
    /// A leading slash on the path is tolerated. Values that do not form a
    /// valid URL (such as a non-numeric port) fail here explicitly.
    pub fn base_url(&self) -> Result<Url, BridgeError> {
        let address = format!(
            "{}://{}:{}/{}",
            self.scheme,
            self.host,
            self.port,
            self.path.trim_start_matches('/')
        );

        Url::parse(&address).map_err(|source| BridgeError::Address {
            address,
            message: source.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(name: &str, value: &str) -> PluginConfigurationParameterValue {
        PluginConfigurationParameterValue {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn full_parameter_list() -> Vec<PluginConfigurationParameterValue> {
        vec![
            parameter(PARAM_SCHEME, "https"),
            parameter(PARAM_HOST, "legacy.example.com"),
            parameter(PARAM_PORT, "8443"),
            parameter(PARAM_PATH, "api"),
            parameter(PARAM_SERVICE, "inventoryPlugin"),
            parameter(PARAM_CLIENT_ID, "plugin@example.com"),
            parameter(PARAM_CLIENT_SECRET, "s3cret-hash"),
        ]
    }

    #[test]
    fn derives_all_fields_verbatim() {
        let config = ConnectionConfig::from_parameters(&full_parameter_list());

        assert_eq!(config.scheme, "https");
        assert_eq!(config.host, "legacy.example.com");
        assert_eq!(config.port, "8443");
        assert_eq!(config.path, "api");
        assert_eq!(config.service, "inventoryPlugin");
        assert_eq!(config.client_id, "plugin@example.com");
        assert_eq!(config.client_secret, "s3cret-hash");
        assert!(config.ensure_complete().is_ok());
    }

    #[test]
    fn ignores_unrecognized_parameter_names() {
        let mut parameters = full_parameter_list();
        parameters.push(parameter("API_HOSTNAME", "attacker.example.com"));
        parameters.push(parameter("api_host", "lowercase.example.com"));

        let config = ConnectionConfig::from_parameters(&parameters);
        assert_eq!(config.host, "legacy.example.com");
    }

    #[test]
    fn last_occurrence_of_a_parameter_wins() {
        let mut parameters = full_parameter_list();
        parameters.push(parameter(PARAM_HOST, "failover.example.com"));

        let config = ConnectionConfig::from_parameters(&parameters);
        assert_eq!(config.host, "failover.example.com");
    }

    #[test]
    fn reports_the_missing_parameter_by_name() {
        let parameters: Vec<_> = full_parameter_list()
            .into_iter()
            .filter(|p| p.name != PARAM_CLIENT_SECRET)
            .collect();

        let config = ConnectionConfig::from_parameters(&parameters);
        match config.ensure_complete() {
            Err(BridgeError::MissingParameter { parameter }) => {
                assert_eq!(parameter, PARAM_CLIENT_SECRET);
            }
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn renders_the_base_url() {
        let config = ConnectionConfig::from_parameters(&full_parameter_list());
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "https://legacy.example.com:8443/api");
    }

    #[test]
    fn tolerates_a_leading_slash_in_the_path() {
        let mut parameters = full_parameter_list();
        parameters.push(parameter(PARAM_PATH, "/api/v2"));

        let config = ConnectionConfig::from_parameters(&parameters);
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "https://legacy.example.com:8443/api/v2");
    }

    #[test]
    fn non_numeric_port_fails_instead_of_building_a_malformed_url() {
        let mut parameters = full_parameter_list();
        parameters.push(parameter(PARAM_PORT, "not-a-port"));

        let config = ConnectionConfig::from_parameters(&parameters);
        assert!(config.ensure_complete().is_ok());
        assert!(matches!(config.base_url(), Err(BridgeError::Address { .. })));
    }
}
