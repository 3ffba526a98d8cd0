use crate::{
    RoomId, RoomTypeId, requests, responses,
    requests::{MapFilters, MapStatsQuery},
};
use jiff::civil::Date;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the booking backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Bearer token for the back office endpoints. The public booking
    /// endpoints work without it.
    pub token: Option<SecretString>,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.address.trim_end_matches('/'))
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn get_query(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);
        self.authorize(request).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn empty_patch(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.patch(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.authorize(request).send().await
    }
}

/// Public booking endpoints
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.get("health").await?;
        ok_empty(response).await
    }

    pub async fn get_property_info(
        &self,
        slug: &str,
    ) -> Result<responses::PropertyInfo, ClientError> {
        let response = self.get(&format!("public/properties/{slug}")).await?;
        ok_body(response).await
    }

    pub async fn search_availability(
        &self,
        slug: &str,
        query: &requests::AvailabilityQuery,
    ) -> Result<responses::AvailabilityResponse, ClientError> {
        let response = self
            .post(&format!("public/properties/{slug}/availability"), query)
            .await?;
        ok_body(response).await
    }

    pub async fn create_booking(
        &self,
        draft: &requests::BookingDraft,
    ) -> Result<responses::BookingRecord, ClientError> {
        let response = self.post("public/bookings", draft).await?;
        ok_body(response).await
    }
}

/// Room map endpoints
impl APIClient {
    pub async fn get_map_data(
        &self,
        filters: &MapFilters,
    ) -> Result<responses::MapResponse, ClientError> {
        let response = self.get_query("room-map/data", filters).await?;
        ok_body(response).await
    }

    pub async fn get_map_stats(
        &self,
        start_date: Date,
        end_date: Date,
        property_id: Option<crate::PropertyId>,
    ) -> Result<responses::MapStats, ClientError> {
        let query = MapStatsQuery {
            start_date,
            end_date,
            property_id,
        };
        let response = self.get_query("room-map/stats", &query).await?;
        ok_body(response).await
    }

    pub async fn execute_bulk_operation(
        &self,
        operation: &requests::BulkOperation,
    ) -> Result<responses::BulkOperationResult, ClientError> {
        let response = self.post("room-map/bulk-operations", operation).await?;
        ok_body(response).await
    }

    pub async fn create_quick_booking(
        &self,
        draft: &requests::QuickBookingDraft,
    ) -> Result<responses::BookingRecord, ClientError> {
        let response = self.post("room-map/quick-booking", draft).await?;
        ok_body(response).await
    }
}

/// Room type and room management endpoints
impl APIClient {
    pub async fn get_room_types(
        &self,
        query: &requests::RoomTypeQuery,
    ) -> Result<responses::RoomTypePage, ClientError> {
        let response = self.get_query("room-types", query).await?;
        ok_body(response).await
    }

    pub async fn get_room_type(
        &self,
        id: RoomTypeId,
    ) -> Result<responses::RoomTypeSummary, ClientError> {
        let response = self.get(&format!("room-types/{id}")).await?;
        ok_body(response).await
    }

    pub async fn create_room_type(
        &self,
        details: &requests::RoomTypeInput,
    ) -> Result<responses::RoomTypeSummary, ClientError> {
        let response = self.post("room-types", details).await?;
        ok_body(response).await
    }

    pub async fn update_room_type(
        &self,
        id: RoomTypeId,
        details: &requests::RoomTypeInput,
    ) -> Result<responses::RoomTypeSummary, ClientError> {
        let response = self.put(&format!("room-types/{id}"), details).await?;
        ok_body(response).await
    }

    /// Flip whether the room type is offered in the public booking flow.
    pub async fn toggle_room_type_bookable(
        &self,
        id: RoomTypeId,
    ) -> Result<responses::RoomTypeSummary, ClientError> {
        let response = self
            .empty_patch(&format!("room-types/{id}/toggle-bookable"))
            .await?;
        ok_body(response).await
    }

    pub async fn delete_room_type(
        &self,
        id: RoomTypeId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("room-types/{id}")).await?;
        ok_empty(response).await
    }

    pub async fn list_rooms(
        &self,
        query: &requests::RoomQuery,
    ) -> Result<Vec<responses::Room>, ClientError> {
        let response = self.get_query("rooms", query).await?;
        ok_body(response).await
    }

    pub async fn create_room(
        &self,
        details: &requests::RoomInput,
    ) -> Result<responses::Room, ClientError> {
        let response = self.post("rooms", details).await?;
        ok_body(response).await
    }

    pub async fn update_room(
        &self,
        id: RoomId,
        details: &requests::RoomInput,
    ) -> Result<responses::Room, ClientError> {
        let response = self.put(&format!("rooms/{id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_room(&self, id: RoomId) -> Result<(), ClientError> {
        let response = self.delete(&format!("rooms/{id}")).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with a non-success status. `detail` carries the
    /// message from the error body, when there was one.
    #[error("{}", .detail.as_deref().unwrap_or("Unexpected API response"))]
    APIError {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn api(status: StatusCode, detail: Option<&str>) -> Self {
        Self::APIError {
            status,
            detail: detail.map(str::to_string),
        }
    }

    /// Human-readable message provided by the server, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::APIError { detail, .. } => detail.as_deref(),
            Self::Network(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
        }
    }
}

/// Pull the `detail` field out of an error body, ignoring bodies that are
/// not JSON or carry structured validation errors instead of a string.
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<responses::ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.trim().is_empty())
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, %body, "API returned an error");
    ClientError::APIError {
        status,
        detail: error_detail(&body),
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}
