use crate::{
    BookingId, BookingStatus, CellStatus, PropertyId, RoomId, RoomTypeId,
};
use jiff::civil::{Date, Time};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Public information about a property, shown at the top of the booking
/// wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub id: PropertyId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub check_in_time: Option<Time>,
    pub check_out_time: Option<Time>,
    pub currency: String,
}

/// A room and its room type that can host the searched stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub room_type_id: RoomTypeId,
    pub room_type_name: String,
    pub description: Option<String>,
    pub max_capacity: u32,
    pub rate_per_night: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available_rooms: Vec<AvailableRoom>,
}

/// A booking as persisted by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    /// Confirmation number shown to the guest.
    pub reservation_number: String,
    pub status: BookingStatus,
    pub check_in: Date,
    pub check_out: Date,
    pub guest_name: String,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    pub date: Date,
    pub status: CellStatus,
    pub booking_id: Option<BookingId>,
    pub guest_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub floor: Option<i32>,
    pub is_out_of_order: bool,
    pub cells: Vec<MapCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCategory {
    pub room_type_id: RoomTypeId,
    pub room_type_name: String,
    pub rooms: Vec<MapRoom>,
}

/// Room status grid, one cell per room per night of the requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapResponse {
    pub start_date: Date,
    pub end_date: Date,
    pub categories: Vec<MapCategory>,
}

impl MapResponse {
    pub fn room_count(&self) -> usize {
        self.categories.iter().map(|c| c.rooms.len()).sum()
    }
}

/// Aggregate totals for the same window as a [`MapResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStats {
    pub total_rooms: u32,
    pub occupied_room_nights: u32,
    pub available_room_nights: u32,
    pub out_of_order_room_nights: u32,
    /// Percentage in `0.0..=100.0`.
    pub occupancy_rate: f64,
    pub revenue: Decimal,
    pub average_daily_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperationResult {
    pub affected_rooms: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeSummary {
    pub id: RoomTypeId,
    pub property_id: PropertyId,
    pub name: String,
    pub description: Option<String>,
    pub base_capacity: u32,
    pub max_capacity: u32,
    pub is_bookable: bool,
    pub room_count: u32,
    pub base_rate: Decimal,
}

/// A page of room types along with the server's pagination counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypePage {
    pub room_types: Vec<RoomTypeSummary>,
    pub total: u32,
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub property_id: PropertyId,
    pub room_type_id: RoomTypeId,
    pub number: String,
    pub floor: Option<i32>,
    pub is_out_of_order: bool,
}

/// Error body returned by the API on non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
