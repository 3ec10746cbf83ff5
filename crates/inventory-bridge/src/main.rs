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

use clap::Parser;
use inventory_bridge::legacy::HttpLegacyClient;
use inventory_bridge::proto;
use inventory_bridge::proto::plugin_api_server::PluginApiServer;
use inventory_bridge::services::PluginApiService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Server;
use tracing::info;

/// Serves the inventory plugin API against a legacy query-string backend.
#[derive(Parser, Debug)]
#[command(name = "inventory-bridge", version, about)]
struct Args {
    /// Address to accept plugin API connections on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Bound on a single legacy backend request, in seconds
    #[arg(long, default_value_t = 30)]
    backend_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let backend = HttpLegacyClient::new(Duration::from_secs(args.backend_timeout_secs))?;
    let service = PluginApiService::new(Arc::new(backend));

    // Set up reflection service
    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
        .build()?;

    info!("Starting inventory plugin bridge on {}", args.listen);

    Server::builder()
        .add_service(reflection_service)
        .add_service(PluginApiServer::new(service))
        .serve(args.listen)
        .await?;

    Ok(())
}
