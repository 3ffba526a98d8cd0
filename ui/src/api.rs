//! The seam between orchestration units and the booking API.

use jiff::civil::Date;
use payloads::{
    APIClient, ClientError, PropertyId, RoomTypeId,
    requests::{
        AvailabilityQuery, BookingDraft, BulkOperation, MapFilters,
        QuickBookingDraft, RoomTypeQuery,
    },
    responses::{
        AvailabilityResponse, BookingRecord, BulkOperationResult, MapResponse,
        MapStats, PropertyInfo, RoomTypePage, RoomTypeSummary,
    },
};

/// Booking API operations the orchestration units depend on.
///
/// Futures are not required to be `Send`: units run on a single-threaded
/// executor.
#[allow(async_fn_in_trait)]
pub trait BookingApi {
    async fn get_property_info(
        &self,
        slug: &str,
    ) -> Result<PropertyInfo, ClientError>;

    async fn search_availability(
        &self,
        slug: &str,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResponse, ClientError>;

    async fn create_booking(
        &self,
        draft: &BookingDraft,
    ) -> Result<BookingRecord, ClientError>;

    async fn get_map_data(
        &self,
        filters: &MapFilters,
    ) -> Result<MapResponse, ClientError>;

    async fn get_map_stats(
        &self,
        start_date: Date,
        end_date: Date,
        property_id: Option<PropertyId>,
    ) -> Result<MapStats, ClientError>;

    async fn execute_bulk_operation(
        &self,
        operation: &BulkOperation,
    ) -> Result<BulkOperationResult, ClientError>;

    async fn create_quick_booking(
        &self,
        draft: &QuickBookingDraft,
    ) -> Result<BookingRecord, ClientError>;

    async fn get_room_types(
        &self,
        query: &RoomTypeQuery,
    ) -> Result<RoomTypePage, ClientError>;

    async fn toggle_room_type_bookable(
        &self,
        id: RoomTypeId,
    ) -> Result<RoomTypeSummary, ClientError>;

    async fn delete_room_type(&self, id: RoomTypeId)
    -> Result<(), ClientError>;
}

impl BookingApi for APIClient {
    async fn get_property_info(
        &self,
        slug: &str,
    ) -> Result<PropertyInfo, ClientError> {
        APIClient::get_property_info(self, slug).await
    }

    async fn search_availability(
        &self,
        slug: &str,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResponse, ClientError> {
        APIClient::search_availability(self, slug, query).await
    }

    async fn create_booking(
        &self,
        draft: &BookingDraft,
    ) -> Result<BookingRecord, ClientError> {
        APIClient::create_booking(self, draft).await
    }

    async fn get_map_data(
        &self,
        filters: &MapFilters,
    ) -> Result<MapResponse, ClientError> {
        APIClient::get_map_data(self, filters).await
    }

    async fn get_map_stats(
        &self,
        start_date: Date,
        end_date: Date,
        property_id: Option<PropertyId>,
    ) -> Result<MapStats, ClientError> {
        APIClient::get_map_stats(self, start_date, end_date, property_id).await
    }

    async fn execute_bulk_operation(
        &self,
        operation: &BulkOperation,
    ) -> Result<BulkOperationResult, ClientError> {
        APIClient::execute_bulk_operation(self, operation).await
    }

    async fn create_quick_booking(
        &self,
        draft: &QuickBookingDraft,
    ) -> Result<BookingRecord, ClientError> {
        APIClient::create_quick_booking(self, draft).await
    }

    async fn get_room_types(
        &self,
        query: &RoomTypeQuery,
    ) -> Result<RoomTypePage, ClientError> {
        APIClient::get_room_types(self, query).await
    }

    async fn toggle_room_type_bookable(
        &self,
        id: RoomTypeId,
    ) -> Result<RoomTypeSummary, ClientError> {
        APIClient::toggle_room_type_bookable(self, id).await
    }

    async fn delete_room_type(
        &self,
        id: RoomTypeId,
    ) -> Result<(), ClientError> {
        APIClient::delete_room_type(self, id).await
    }
}
