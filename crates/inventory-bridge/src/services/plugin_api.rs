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

//! Plugin API method handlers
//!
//! Each handler derives a call-scoped connection configuration from the
//! request's parameter list, marshals one legacy query, performs the fetch
//! through the backend seam and adapts the JSON response back to the RPC
//! shape.

use crate::config::ConnectionConfig;
use crate::error::BridgeResult;
use crate::legacy::{LegacyBackend, LegacyQuery};
use crate::proto::plugin_api_server::PluginApi;
use crate::proto::{
    CancelBookingRequest, ConfirmBookingRequest, CreateConfirmBookingRequest, GetDefinitionRequest, GetProductByIdRequest,
    PluginConfigurationParameterValue, PluginDefinition, ProductAvailabilityRequest, ProductsAvailabilityRequest, ReservationData,
    ReservationRequest, SearchProductsRequest,
};
use crate::services::{adapter, descriptor};
use prost_types::Struct;
use std::sync::Arc;
use tonic::{Request, Response, Result as TonicResult, Status};
use tracing::{info, instrument, warn};

/// Plugin API implementation backed by the legacy HTTP service.
pub struct PluginApiService<B> {
    backend: Arc<B>,
}

impl<B> PluginApiService<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Derive and validate the connection configuration for one call.
    fn call_config(&self, parameters: &[PluginConfigurationParameterValue]) -> Result<ConnectionConfig, Status> {
        let config = ConnectionConfig::from_parameters(parameters);
        config.ensure_complete()?;
        Ok(config)
    }
}

/// Append the reservation payload fields shared by createReservation and
/// confirmBooking.
fn reservation_query(query: LegacyQuery, data: &ReservationData) -> BridgeResult<LegacyQuery> {
    Ok(query
        .json_field("customerContact", &data.customer_contact)?
        .field("notes", data.notes.clone())
        .json_field("date", &data.date)?
        .json_field("time", &data.time)?
        .json_field("reservations", &data.reservations)?
        .field("platformId", data.platform_id.clone())
        .json_field("bookingSource", &data.booking_source)?
        .field("externalSaleId", data.external_sale_id.clone()))
}

#[tonic::async_trait]
impl<B: LegacyBackend> PluginApi for PluginApiService<B> {
    #[instrument(skip(self, _request))]
    async fn get_definition(&self, _request: Request<GetDefinitionRequest>) -> TonicResult<Response<PluginDefinition>> {
        Ok(Response::new(descriptor::plugin_definition()))
    }

    type SearchProductsStream = adapter::ItemStream;

    #[instrument(skip(self, request))]
    async fn search_products(&self, request: Request<SearchProductsRequest>) -> TonicResult<Response<Self::SearchProductsStream>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;

        info!("Streaming the backend product list");
        let query = LegacyQuery::new("getProductList");

        Ok(adapter::streamed(Arc::clone(&self.backend), config, query))
    }

    #[instrument(skip(self, request))]
    async fn get_product_by_id(&self, request: Request<GetProductByIdRequest>) -> TonicResult<Response<Struct>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;

        info!("Fetching product description for {}", req.external_id);
        let query = LegacyQuery::new("getProductDescription").field("externalId", req.external_id);

        adapter::unary(self.backend.as_ref(), config, query).await
    }

    type GetAvailableProductsStream = adapter::ItemStream;

    #[instrument(skip(self, request))]
    async fn get_available_products(
        &self,
        request: Request<ProductsAvailabilityRequest>,
    ) -> TonicResult<Response<Self::GetAvailableProductsStream>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;

        info!("Streaming available products for capacity {}", req.required_capacity);
        let query = LegacyQuery::new("getAvailableProducts")
            .field("requiredCapacity", req.required_capacity.to_string())
            .json_field("externalProductIds", &req.external_product_ids)?
            .json_field("range", &req.range)?;

        Ok(adapter::streamed(Arc::clone(&self.backend), config, query))
    }

    type GetProductAvailabilityStream = adapter::ItemStream;

    #[instrument(skip(self, request))]
    async fn get_product_availability(
        &self,
        request: Request<ProductAvailabilityRequest>,
    ) -> TonicResult<Response<Self::GetProductAvailabilityStream>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;

        info!("Streaming availability for product {}", req.product_id);
        let query = LegacyQuery::new("getProductAvailability")
            .field("productId", req.product_id)
            .json_field("range", &req.range)?;

        Ok(adapter::streamed(Arc::clone(&self.backend), config, query))
    }

    #[instrument(skip(self, request))]
    async fn create_reservation(&self, request: Request<ReservationRequest>) -> TonicResult<Response<Struct>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;
        let data = req
            .reservation_data
            .ok_or_else(|| Status::invalid_argument("reservationData is required"))?;

        info!("Creating reservation for sale {}", data.external_sale_id);
        let query = reservation_query(LegacyQuery::new("createReservation"), &data)?;

        adapter::unary(self.backend.as_ref(), config, query).await
    }

    #[instrument(skip(self, request))]
    async fn confirm_booking(&self, request: Request<ConfirmBookingRequest>) -> TonicResult<Response<Struct>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;
        let data = req
            .reservation_data
            .ok_or_else(|| Status::invalid_argument("reservationData is required"))?;

        info!("Confirming booking for reservation {}", req.reservation_confirmation_code);
        let query = reservation_query(
            LegacyQuery::new("confirmBooking").field("reservationConfirmationCode", req.reservation_confirmation_code),
            &data,
        )?
        .json_field("confirmationData", &req.confirmation_data)?;

        adapter::unary(self.backend.as_ref(), config, query).await
    }

    #[instrument(skip(self, _request))]
    async fn create_and_confirm_booking(&self, _request: Request<CreateConfirmBookingRequest>) -> TonicResult<Response<Struct>> {
        warn!("createAndConfirmBooking invoked but not supported by this plugin");
        Err(Status::unimplemented("createAndConfirmBooking is not supported by this plugin"))
    }

    #[instrument(skip(self, request))]
    async fn cancel_booking(&self, request: Request<CancelBookingRequest>) -> TonicResult<Response<Struct>> {
        let req = request.into_inner();
        let config = self.call_config(&req.parameters)?;

        info!("Cancelling booking {}", req.booking_confirmation_code);
        let query = LegacyQuery::new("cancelBooking")
            .field("bookingConfirmationCode", req.booking_confirmation_code)
            .field("agentCode", req.agent_code);

        adapter::unary(self.backend.as_ref(), config, query).await
    }
}
