//! A scripted stand-in for the booking API.
//!
//! `MockApi` records every call, answers from per-endpoint reply queues and
//! falls back to fixture data when a queue is empty. A call can be held
//! open on a gate to simulate a slow response arriving after a newer one.
//!
//! Replies are taken from the queue when the call is made, not when it
//! completes, so queued replies match call order even when gated.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use jiff::civil::Date;
use payloads::{
    ClientError, PropertyId, RoomTypeId,
    requests::{
        AvailabilityQuery, BookingDraft, BulkOperation, MapFilters,
        QuickBookingDraft, RoomTypeQuery,
    },
    responses::{
        AvailabilityResponse, BookingRecord, BulkOperationResult, MapResponse,
        MapStats, PropertyInfo, RoomTypePage, RoomTypeSummary,
    },
};
use tokio::sync::oneshot;
use ui::BookingApi;

type Reply<T> = Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    PropertyInfo,
    SearchAvailability,
    CreateBooking,
    MapData,
    MapStats,
    BulkOperation,
    QuickBooking,
    RoomTypes,
    ToggleBookable,
    DeleteRoomType,
}

/// A recorded call with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetPropertyInfo(String),
    SearchAvailability {
        slug: String,
        query: AvailabilityQuery,
    },
    CreateBooking(BookingDraft),
    GetMapData(MapFilters),
    GetMapStats {
        start_date: Date,
        end_date: Date,
        property_id: Option<PropertyId>,
    },
    ExecuteBulkOperation(BulkOperation),
    CreateQuickBooking(QuickBookingDraft),
    GetRoomTypes(RoomTypeQuery),
    ToggleRoomTypeBookable(RoomTypeId),
    DeleteRoomType(RoomTypeId),
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::GetPropertyInfo(_) => Endpoint::PropertyInfo,
            Self::SearchAvailability { .. } => Endpoint::SearchAvailability,
            Self::CreateBooking(_) => Endpoint::CreateBooking,
            Self::GetMapData(_) => Endpoint::MapData,
            Self::GetMapStats { .. } => Endpoint::MapStats,
            Self::ExecuteBulkOperation(_) => Endpoint::BulkOperation,
            Self::CreateQuickBooking(_) => Endpoint::QuickBooking,
            Self::GetRoomTypes(_) => Endpoint::RoomTypes,
            Self::ToggleRoomTypeBookable(_) => Endpoint::ToggleBookable,
            Self::DeleteRoomType(_) => Endpoint::DeleteRoomType,
        }
    }
}

struct Script<T> {
    replies: RefCell<VecDeque<Reply<T>>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
        }
    }
}

impl<T> Script<T> {
    fn push(&self, reply: Reply<T>) {
        self.replies.borrow_mut().push_back(reply);
    }

    fn next(&self) -> Option<Reply<T>> {
        self.replies.borrow_mut().pop_front()
    }
}

#[derive(Default)]
struct Inner {
    calls: RefCell<Vec<Call>>,
    gates: RefCell<HashMap<Endpoint, VecDeque<oneshot::Receiver<()>>>>,
    property_info: Script<PropertyInfo>,
    search: Script<AvailabilityResponse>,
    create_booking: Script<BookingRecord>,
    map_data: Script<MapResponse>,
    map_stats: Script<MapStats>,
    bulk_operation: Script<BulkOperationResult>,
    quick_booking: Script<BookingRecord>,
    room_types: Script<RoomTypePage>,
    toggle_bookable: Script<RoomTypeSummary>,
    delete_room_type: Script<()>,
}

/// Cheap to clone; clones share calls, scripts and gates.
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Rc<Inner>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Call> {
        self.inner
            .calls
            .borrow()
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .cloned()
            .collect()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls_to(endpoint).len()
    }

    pub fn clear_calls(&self) {
        self.inner.calls.borrow_mut().clear();
    }

    /// Hold the next call to `endpoint` until the returned sender fires or
    /// is dropped.
    pub fn hold_next(&self, endpoint: Endpoint) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .gates
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn reply_property_info(&self, reply: Reply<PropertyInfo>) {
        self.inner.property_info.push(reply);
    }

    pub fn reply_search(&self, reply: Reply<AvailabilityResponse>) {
        self.inner.search.push(reply);
    }

    pub fn reply_create_booking(&self, reply: Reply<BookingRecord>) {
        self.inner.create_booking.push(reply);
    }

    pub fn reply_map_data(&self, reply: Reply<MapResponse>) {
        self.inner.map_data.push(reply);
    }

    pub fn reply_map_stats(&self, reply: Reply<MapStats>) {
        self.inner.map_stats.push(reply);
    }

    pub fn reply_bulk_operation(&self, reply: Reply<BulkOperationResult>) {
        self.inner.bulk_operation.push(reply);
    }

    pub fn reply_quick_booking(&self, reply: Reply<BookingRecord>) {
        self.inner.quick_booking.push(reply);
    }

    pub fn reply_room_types(&self, reply: Reply<RoomTypePage>) {
        self.inner.room_types.push(reply);
    }

    pub fn reply_toggle_bookable(&self, reply: Reply<RoomTypeSummary>) {
        self.inner.toggle_bookable.push(reply);
    }

    pub fn reply_delete_room_type(&self, reply: Reply<()>) {
        self.inner.delete_room_type.push(reply);
    }

    async fn respond<T>(
        &self,
        call: Call,
        script: &Script<T>,
        default: impl FnOnce() -> T,
    ) -> Reply<T> {
        let endpoint = call.endpoint();
        self.inner.calls.borrow_mut().push(call);
        let reply = script.next().unwrap_or_else(|| Ok(default()));

        let gate = self
            .inner
            .gates
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            // a dropped sender releases the call as well
            let _ = gate.await;
        }
        reply
    }
}

impl BookingApi for MockApi {
    async fn get_property_info(
        &self,
        slug: &str,
    ) -> Result<PropertyInfo, ClientError> {
        let call = Call::GetPropertyInfo(slug.to_string());
        self.respond(call, &self.inner.property_info, crate::property_info)
            .await
    }

    async fn search_availability(
        &self,
        slug: &str,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResponse, ClientError> {
        let call = Call::SearchAvailability {
            slug: slug.to_string(),
            query: query.clone(),
        };
        self.respond(call, &self.inner.search, || crate::availability(vec![]))
            .await
    }

    async fn create_booking(
        &self,
        draft: &BookingDraft,
    ) -> Result<BookingRecord, ClientError> {
        let call = Call::CreateBooking(draft.clone());
        self.respond(call, &self.inner.create_booking, || {
            crate::booking_record(1)
        })
        .await
    }

    async fn get_map_data(
        &self,
        filters: &MapFilters,
    ) -> Result<MapResponse, ClientError> {
        let call = Call::GetMapData(filters.clone());
        self.respond(call, &self.inner.map_data, || {
            crate::map_response(filters, 3)
        })
        .await
    }

    async fn get_map_stats(
        &self,
        start_date: Date,
        end_date: Date,
        property_id: Option<PropertyId>,
    ) -> Result<MapStats, ClientError> {
        let call = Call::GetMapStats {
            start_date,
            end_date,
            property_id,
        };
        self.respond(call, &self.inner.map_stats, || crate::map_stats(3))
            .await
    }

    async fn execute_bulk_operation(
        &self,
        operation: &BulkOperation,
    ) -> Result<BulkOperationResult, ClientError> {
        let call = Call::ExecuteBulkOperation(operation.clone());
        let affected_rooms = operation.room_ids.len() as u32;
        self.respond(call, &self.inner.bulk_operation, || BulkOperationResult {
            affected_rooms,
            message: format!("{affected_rooms} quartos atualizados"),
        })
        .await
    }

    async fn create_quick_booking(
        &self,
        draft: &QuickBookingDraft,
    ) -> Result<BookingRecord, ClientError> {
        let call = Call::CreateQuickBooking(draft.clone());
        self.respond(call, &self.inner.quick_booking, || {
            crate::booking_record(2)
        })
        .await
    }

    async fn get_room_types(
        &self,
        query: &RoomTypeQuery,
    ) -> Result<RoomTypePage, ClientError> {
        let call = Call::GetRoomTypes(query.clone());
        let (page, per_page) = (query.page, query.per_page);
        self.respond(call, &self.inner.room_types, || {
            crate::room_type_page(vec![], 0, page, per_page)
        })
        .await
    }

    async fn toggle_room_type_bookable(
        &self,
        id: RoomTypeId,
    ) -> Result<RoomTypeSummary, ClientError> {
        let call = Call::ToggleRoomTypeBookable(id);
        self.respond(call, &self.inner.toggle_bookable, || {
            crate::room_type(id.0, 2, true)
        })
        .await
    }

    async fn delete_room_type(
        &self,
        id: RoomTypeId,
    ) -> Result<(), ClientError> {
        let call = Call::DeleteRoomType(id);
        self.respond(call, &self.inner.delete_room_type, || ()).await
    }
}
