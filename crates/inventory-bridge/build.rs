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

use std::{env, error::Error, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Locate protoc. Honor an explicitly provided PROTOC, otherwise fall back
    // to the vendored binary so the build works without a system protoc.
    if env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            // SAFETY: build scripts are single-threaded at this point.
            unsafe { env::set_var("PROTOC", protoc) };
        }
    }

    // The serde attributes define the canonical JSON text used when structured
    // request fields are embedded in the legacy query string.
    tonic_build::configure()
        .file_descriptor_set_path(out_dir.join("plugin_api_descriptor.bin"))
        .type_attribute(".inventory.plugin", "#[derive(serde::Serialize, serde::Deserialize)]")
        .type_attribute(".inventory.plugin", "#[serde(rename_all = \"camelCase\")]")
        .compile(&["proto/plugin_api.proto"], &["proto"])?;

    Ok(())
}
