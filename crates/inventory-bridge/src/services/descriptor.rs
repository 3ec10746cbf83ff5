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

//! Static plugin descriptor

use crate::config::{PARAM_CLIENT_ID, PARAM_CLIENT_SECRET, PARAM_HOST, PARAM_PATH, PARAM_PORT, PARAM_SCHEME, PARAM_SERVICE};
use crate::proto::{PluginCapability, PluginConfigurationParameter, PluginDefinition, PluginParameterDataType};

/// Build the capability and parameter metadata advertised to callers.
///
/// Pure configuration data; no backend call, cannot fail.
pub fn plugin_definition() -> PluginDefinition {
    PluginDefinition {
        name: "inventory-bridge".to_string(),
        description: "Fulfills inventory plugin calls against a legacy query-string backend".to_string(),
        capabilities: vec![
            PluginCapability::SupportsReservations as i32,
            PluginCapability::SupportsAvailability as i32,
        ],
        parameters: vec![
            required_parameter(PARAM_SCHEME, PluginParameterDataType::String),
            required_parameter(PARAM_HOST, PluginParameterDataType::String),
            required_parameter(PARAM_PORT, PluginParameterDataType::Long),
            required_parameter(PARAM_PATH, PluginParameterDataType::String),
            required_parameter(PARAM_SERVICE, PluginParameterDataType::String),
            required_parameter(PARAM_CLIENT_ID, PluginParameterDataType::String),
            required_parameter(PARAM_CLIENT_SECRET, PluginParameterDataType::String),
        ],
    }
}

fn required_parameter(name: &str, data_type: PluginParameterDataType) -> PluginConfigurationParameter {
    PluginConfigurationParameter {
        name: name.to_string(),
        r#type: data_type as i32,
        required: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_reservations_and_availability() {
        let definition = plugin_definition();

        assert!(definition.capabilities.contains(&(PluginCapability::SupportsReservations as i32)));
        assert!(definition.capabilities.contains(&(PluginCapability::SupportsAvailability as i32)));
    }

    #[test]
    fn requires_all_seven_connection_parameters() {
        let definition = plugin_definition();

        assert_eq!(definition.parameters.len(), 7);
        assert!(definition.parameters.iter().all(|p| p.required));
    }

    #[test]
    fn port_is_typed_as_long() {
        let definition = plugin_definition();

        let port = definition.parameters.iter().find(|p| p.name == PARAM_PORT).unwrap();
        assert_eq!(port.r#type, PluginParameterDataType::Long as i32);

        let host = definition.parameters.iter().find(|p| p.name == PARAM_HOST).unwrap();
        assert_eq!(host.r#type, PluginParameterDataType::String as i32);
    }
}
