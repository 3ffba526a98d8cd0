pub mod mock;
pub mod stub_server;

pub use mock::{Call, Endpoint, MockApi};
pub use stub_server::{RecordedRequest, StubServer};

use jiff::civil::{Date, date};
use payloads::{
    BookingId, BookingStatus, CellStatus, PropertyId, RoomId, RoomTypeId,
    requests::{
        self, BulkOperationKind, GuestDetails, MapFilters, SearchCriteria,
    },
    responses,
};
use rust_decimal::Decimal;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use ui::time::TimeSource;

pub const PROPERTY_SLUG: &str = "pousada-do-sol";

/// The date tests treat as today. A Wednesday.
pub fn today() -> Date {
    date(2025, 1, 1)
}

/// A time source pinned to [`today`].
pub fn time_source() -> TimeSource {
    TimeSource::new(today())
}

/// Install a quiet subscriber once per test binary. Set `RUST_LOG` to see
/// more.
pub fn init_test_logging() {
    let subscriber = ui::logs::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

pub fn property_info() -> responses::PropertyInfo {
    responses::PropertyInfo {
        id: PropertyId(1),
        slug: PROPERTY_SLUG.into(),
        name: "Pousada do Sol".into(),
        description: Some("Frente para o mar".into()),
        address: Some("Av. Beira Mar, 100".into()),
        city: Some("Florianópolis".into()),
        phone: None,
        email: Some("reservas@pousadadosol.example".into()),
        check_in_time: Some(jiff::civil::time(14, 0, 0, 0)),
        check_out_time: Some(jiff::civil::time(12, 0, 0, 0)),
        currency: "BRL".into(),
    }
}

/// Criteria for a three night stay starting a week from [`today`].
pub fn search_criteria() -> SearchCriteria {
    SearchCriteria::new(date(2025, 1, 8), date(2025, 1, 11))
}

pub fn available_room_a() -> responses::AvailableRoom {
    responses::AvailableRoom {
        room_id: RoomId(101),
        room_number: "101".into(),
        room_type_id: RoomTypeId(1),
        room_type_name: "Standard".into(),
        description: None,
        max_capacity: 2,
        rate_per_night: Decimal::new(25000, 2),
        total_price: Decimal::new(75000, 2),
        amenities: vec!["Wi-Fi".into(), "Ar-condicionado".into()],
    }
}

pub fn available_room_b() -> responses::AvailableRoom {
    responses::AvailableRoom {
        room_id: RoomId(201),
        room_number: "201".into(),
        room_type_id: RoomTypeId(2),
        room_type_name: "Suíte Luxo".into(),
        description: Some("Vista para o mar".into()),
        max_capacity: 4,
        rate_per_night: Decimal::new(48000, 2),
        total_price: Decimal::new(144000, 2),
        amenities: vec!["Wi-Fi".into(), "Banheira".into()],
    }
}

pub fn availability(
    rooms: Vec<responses::AvailableRoom>,
) -> responses::AvailabilityResponse {
    responses::AvailabilityResponse {
        available_rooms: rooms,
    }
}

pub fn guest() -> GuestDetails {
    GuestDetails {
        name: "Maria Silva".into(),
        email: "maria@example.com".into(),
        phone: Some("+55 48 99999-0000".into()),
        document: None,
    }
}

pub fn booking_record(id: i64) -> responses::BookingRecord {
    responses::BookingRecord {
        id: BookingId(id),
        reservation_number: format!("RES-{id:05}"),
        status: BookingStatus::Confirmed,
        check_in: date(2025, 1, 8),
        check_out: date(2025, 1, 11),
        guest_name: "Maria Silva".into(),
        total_price: Decimal::new(75000, 2),
    }
}

/// A one-category grid with `rooms` rooms, every night available.
pub fn map_response(filters: &MapFilters, rooms: i64) -> responses::MapResponse {
    let dates: Vec<Date> = filters
        .start_date
        .series(jiff::Span::new().days(1))
        .take_while(|d| *d <= filters.end_date)
        .collect();
    let rooms = (1..=rooms)
        .map(|n| responses::MapRoom {
            room_id: RoomId(100 + n),
            room_number: format!("{}", 100 + n),
            floor: Some(1),
            is_out_of_order: false,
            cells: dates
                .iter()
                .map(|d| responses::MapCell {
                    date: *d,
                    status: CellStatus::Available,
                    booking_id: None,
                    guest_name: None,
                })
                .collect(),
        })
        .collect();
    responses::MapResponse {
        start_date: filters.start_date,
        end_date: filters.end_date,
        categories: vec![responses::MapCategory {
            room_type_id: RoomTypeId(1),
            room_type_name: "Standard".into(),
            rooms,
        }],
    }
}

pub fn map_stats(total_rooms: u32) -> responses::MapStats {
    responses::MapStats {
        total_rooms,
        occupied_room_nights: 0,
        available_room_nights: total_rooms * 31,
        out_of_order_room_nights: 0,
        occupancy_rate: 0.0,
        revenue: Decimal::ZERO,
        average_daily_rate: Decimal::ZERO,
    }
}

pub fn bulk_block(room_ids: &[i64]) -> requests::BulkOperation {
    requests::BulkOperation {
        operation: BulkOperationKind::Block,
        room_ids: room_ids.iter().copied().map(RoomId).collect(),
        start_date: date(2025, 1, 10),
        end_date: date(2025, 1, 12),
        reason: Some("Pintura".into()),
    }
}

pub fn quick_booking_draft() -> requests::QuickBookingDraft {
    requests::QuickBookingDraft {
        room_id: RoomId(101),
        check_in: date(2025, 1, 8),
        check_out: date(2025, 1, 11),
        guest_name: "Maria Silva".into(),
        guest_email: None,
        guest_phone: Some("+55 48 99999-0000".into()),
        adults: 2,
        children: 0,
        rate: None,
        notes: None,
    }
}

pub fn room_type(
    id: i64,
    max_capacity: u32,
    is_bookable: bool,
) -> responses::RoomTypeSummary {
    responses::RoomTypeSummary {
        id: RoomTypeId(id),
        property_id: PropertyId(1),
        name: format!("Tipo {id}"),
        description: None,
        base_capacity: max_capacity.min(2),
        max_capacity,
        is_bookable,
        room_count: 4,
        base_rate: Decimal::new(30000, 2),
    }
}

/// Page `page` of a listing with `total` room types in pages of
/// `per_page`.
pub fn room_type_page(
    room_types: Vec<responses::RoomTypeSummary>,
    total: u32,
    page: u32,
    per_page: u32,
) -> responses::RoomTypePage {
    responses::RoomTypePage {
        room_types,
        total,
        page,
        pages: total.div_ceil(per_page.max(1)),
        per_page,
    }
}

pub fn room_type_input(is_bookable: bool) -> requests::RoomTypeInput {
    requests::RoomTypeInput {
        property_id: PropertyId(1),
        name: "Suíte Luxo".into(),
        description: Some("Vista para o mar".into()),
        base_capacity: 2,
        max_capacity: 4,
        base_rate: Decimal::new(48000, 2),
        is_bookable,
    }
}

pub fn room_input(number: &str) -> requests::RoomInput {
    requests::RoomInput {
        property_id: PropertyId(1),
        room_type_id: RoomTypeId(2),
        number: number.into(),
        floor: Some(2),
        is_out_of_order: false,
    }
}

pub fn room(id: i64, number: &str) -> responses::Room {
    responses::Room {
        id: RoomId(id),
        property_id: PropertyId(1),
        room_type_id: RoomTypeId(2),
        number: number.into(),
        floor: Some(2),
        is_out_of_order: false,
    }
}
