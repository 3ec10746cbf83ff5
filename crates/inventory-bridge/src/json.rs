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

//! Conversion of backend JSON into protobuf well-known struct values
//!
//! The backend owns the shape of its responses; the bridge forwards them to
//! plugin callers as `google.protobuf.Struct` without enforcing any schema
//! beyond "an object" for unary calls and "an array of objects" for
//! streaming calls.

use crate::error::{BridgeError, BridgeResult};
use prost_types::value::Kind;
use prost_types::{ListValue, Struct, Value as ProtoValue};
use serde_json::Value as JsonValue;

/// Convert a unary backend response into a struct.
///
/// Anything but a JSON object is a backend contract violation.
pub fn struct_from_json(value: JsonValue) -> BridgeResult<Struct> {
    match value {
        JsonValue::Object(map) => Ok(Struct {
            fields: map.into_iter().map(|(key, value)| (key, proto_value_from_json(value))).collect(),
        }),
        _ => Err(BridgeError::Contract { expected: "a JSON object" }),
    }
}

/// Split a streaming backend response into its stream items.
///
/// The value must be a JSON array and every element must be an object.
pub fn struct_items_from_json(value: JsonValue) -> BridgeResult<Vec<Struct>> {
    match value {
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::Object(_) => struct_from_json(item),
                _ => Err(BridgeError::Contract {
                    expected: "a JSON array of objects",
                }),
            })
            .collect(),
        _ => Err(BridgeError::Contract { expected: "a JSON array" }),
    }
}

fn proto_value_from_json(value: JsonValue) -> ProtoValue {
    let kind = match value {
        JsonValue::Null => Kind::NullValue(0),
        JsonValue::Bool(flag) => Kind::BoolValue(flag),
        JsonValue::Number(number) => Kind::NumberValue(number.as_f64().unwrap_or(0.0)),
        JsonValue::String(text) => Kind::StringValue(text),
        JsonValue::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(proto_value_from_json).collect(),
        }),
        JsonValue::Object(map) => Kind::StructValue(Struct {
            fields: map.into_iter().map(|(key, value)| (key, proto_value_from_json(value))).collect(),
        }),
    };

    ProtoValue { kind: Some(kind) }
}
