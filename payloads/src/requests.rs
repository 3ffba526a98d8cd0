use crate::{PropertyId, RoomId, RoomTypeId, responses::AvailableRoom};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_CHILDREN: u32 = 0;
pub const DEFAULT_ROOMS: u32 = 1;

/// What the guest typed into the availability search form.
///
/// Dates are optional because the form starts empty; a search is only
/// dispatched once [`validate_search_criteria`] accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub check_in: Option<Date>,
    pub check_out: Option<Date>,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            adults: DEFAULT_ADULTS,
            children: DEFAULT_CHILDREN,
            rooms: DEFAULT_ROOMS,
        }
    }
}

impl SearchCriteria {
    pub fn new(check_in: Date, check_out: Date) -> Self {
        Self {
            check_in: Some(check_in),
            check_out: Some(check_out),
            ..Self::default()
        }
    }

    /// Number of nights between the dates, if both are set and ordered.
    pub fn nights(&self) -> Option<i64> {
        let (check_in, check_out) = (self.check_in?, self.check_out?);
        let days = (check_out - check_in).get_days() as i64;
        (days > 0).then_some(days)
    }

    /// Convert into the query sent to the API, validating first.
    pub fn to_query(&self) -> Result<AvailabilityQuery, SearchValidation> {
        match validate_search_criteria(self) {
            SearchValidation::Valid => {}
            invalid => return Err(invalid),
        }
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Ok(AvailabilityQuery {
                check_in,
                check_out,
                adults: self.adults,
                children: self.children,
                rooms: self.rooms,
            }),
            _ => Err(SearchValidation::MissingDates),
        }
    }
}

/// Validation result for availability searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchValidation {
    Valid,
    MissingDates,
    CheckOutNotAfterCheckIn,
    NoAdults,
    NoRooms,
}

impl SearchValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::MissingDates => Some(
                "Por favor, selecione as datas de check-in e check-out",
            ),
            Self::CheckOutNotAfterCheckIn => Some(
                "A data de check-out deve ser posterior à data de check-in",
            ),
            Self::NoAdults => Some("Informe ao menos um adulto"),
            Self::NoRooms => Some("Informe ao menos um quarto"),
        }
    }
}

/// Validate search criteria before anything goes over the network.
///
/// Rules:
/// - both dates present
/// - check-out strictly after check-in
/// - at least one adult and one room
pub fn validate_search_criteria(criteria: &SearchCriteria) -> SearchValidation {
    let (Some(check_in), Some(check_out)) =
        (criteria.check_in, criteria.check_out)
    else {
        return SearchValidation::MissingDates;
    };
    if check_out <= check_in {
        return SearchValidation::CheckOutNotAfterCheckIn;
    }
    if criteria.adults == 0 {
        return SearchValidation::NoAdults;
    }
    if criteria.rooms == 0 {
        return SearchValidation::NoRooms;
    }
    SearchValidation::Valid
}

/// Availability search as sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: Date,
    pub check_out: Date,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// National id or passport number.
    pub document: Option<String>,
}

/// A booking assembled client-side, submitted exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub property_slug: String,
    pub room_type_id: RoomTypeId,
    pub room_id: Option<RoomId>,
    pub check_in: Date,
    pub check_out: Date,
    pub adults: u32,
    pub children: u32,
    pub guest: GuestDetails,
    pub notes: Option<String>,
}

impl BookingDraft {
    /// Build a draft for a room picked out of a search result.
    pub fn for_room(
        property_slug: impl Into<String>,
        room: &AvailableRoom,
        query: &AvailabilityQuery,
        guest: GuestDetails,
    ) -> Self {
        Self {
            property_slug: property_slug.into(),
            room_type_id: room.room_type_id,
            room_id: Some(room.room_id),
            check_in: query.check_in,
            check_out: query.check_out,
            adults: query.adults,
            children: query.children,
            guest,
            notes: None,
        }
    }
}

/// Date window and inclusion flags driving the room map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFilters {
    pub start_date: Date,
    pub end_date: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    pub include_out_of_order: bool,
    pub include_cancelled: bool,
}

impl MapFilters {
    /// Filters covering `start` through `start + days`. A window reaching
    /// past the calendar ends on its last day.
    pub fn window(start: Date, days: i64) -> Self {
        let end_date = jiff::Span::new()
            .try_days(days)
            .map(|span| start.saturating_add(span))
            .unwrap_or(if days < 0 { Date::MIN } else { Date::MAX });
        Self {
            start_date: start,
            end_date,
            property_id: None,
            include_out_of_order: false,
            include_cancelled: false,
        }
    }

    /// Shallow merge: fields left as `None` in the update are retained.
    pub fn merged(&self, update: &MapFiltersUpdate) -> Self {
        Self {
            start_date: update.start_date.unwrap_or(self.start_date),
            end_date: update.end_date.unwrap_or(self.end_date),
            property_id: update.property_id.unwrap_or(self.property_id),
            include_out_of_order: update
                .include_out_of_order
                .unwrap_or(self.include_out_of_order),
            include_cancelled: update
                .include_cancelled
                .unwrap_or(self.include_cancelled),
        }
    }
}

/// Partial change to [`MapFilters`].
///
/// `property_id: Some(None)` clears the property selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapFiltersUpdate {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub property_id: Option<Option<PropertyId>>,
    pub include_out_of_order: Option<bool>,
    pub include_cancelled: Option<bool>,
}

/// Query for the aggregate room map statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapStatsQuery {
    pub start_date: Date,
    pub end_date: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperationKind {
    Block,
    Unblock,
    OutOfOrder,
    BackInService,
    Maintenance,
}

/// A status change applied to many rooms over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOperation {
    pub operation: BulkOperationKind,
    pub room_ids: Vec<RoomId>,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}

/// A booking placed straight from a room map cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickBookingDraft {
    pub room_id: RoomId,
    pub check_in: Date,
    pub check_out: Date,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub adults: u32,
    pub children: u32,
    /// Overrides the room type's rate when set.
    pub rate: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomTypeFilters {
    pub property_id: Option<PropertyId>,
    pub search: Option<String>,
    pub is_bookable: Option<bool>,
    pub min_capacity: Option<u32>,
}

/// One page of the room type listing, flattened for the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTypeQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<u32>,
}

impl RoomTypeQuery {
    pub fn new(page: u32, per_page: u32, filters: &RoomTypeFilters) -> Self {
        Self {
            page,
            per_page,
            property_id: filters.property_id,
            // an empty search box means no search
            search: filters
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            is_bookable: filters.is_bookable,
            min_capacity: filters.min_capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeInput {
    pub property_id: PropertyId,
    pub name: String,
    pub description: Option<String>,
    pub base_capacity: u32,
    pub max_capacity: u32,
    pub base_rate: Decimal,
    pub is_bookable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_id: Option<RoomTypeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInput {
    pub property_id: PropertyId,
    pub room_type_id: RoomTypeId,
    pub number: String,
    pub floor: Option<i32>,
    pub is_out_of_order: bool,
}
