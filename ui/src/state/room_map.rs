//! State behind the room map: a date window of room status cells and the
//! aggregate statistics for the same window.
//!
//! Grid and statistics are always fetched as a pair and applied together,
//! so the totals never describe a different window than the cells.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use payloads::{
    requests::{BulkOperation, MapFilters, MapFiltersUpdate, QuickBookingDraft},
    responses::{BookingRecord, BulkOperationResult, MapResponse, MapStats},
};

use super::{Busy, RequestSequence};
use crate::{
    BookingApi,
    contexts::toast::Notifier,
    error::{Error, display_message, messages},
    time::TimeSource,
    utils::time::{DateHeader, date_headers, format_date},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RoomMapSnapshot {
    pub filters: MapFilters,
    /// Shared so that snapshots are cheap and a new grid is detectable by
    /// pointer.
    pub map: Option<Rc<MapResponse>>,
    pub stats: Option<MapStats>,
    pub is_loading: bool,
    /// A bulk operation or quick booking is being submitted.
    pub is_mutating: bool,
    pub error: Option<String>,
}

type HeaderCache = Option<(Rc<MapResponse>, Rc<Vec<DateHeader>>)>;

pub struct RoomMapState<A, N> {
    api: A,
    notifier: N,
    time_source: TimeSource,
    state: RefCell<RoomMapSnapshot>,
    fetches: RequestSequence,
    mutations: Cell<u32>,
    headers: RefCell<HeaderCache>,
}

impl<A: BookingApi, N: Notifier> RoomMapState<A, N> {
    /// Filters start at today and span `window_days` days. Nothing is
    /// fetched until [`Self::refresh_data`] or [`Self::update_filters`].
    pub fn new(
        api: A,
        notifier: N,
        time_source: TimeSource,
        window_days: i64,
    ) -> Self {
        let filters = MapFilters::window(time_source.today(), window_days);
        Self {
            api,
            notifier,
            time_source,
            state: RefCell::new(RoomMapSnapshot {
                filters,
                map: None,
                stats: None,
                is_loading: false,
                is_mutating: false,
                error: None,
            }),
            fetches: RequestSequence::default(),
            mutations: Cell::new(0),
            headers: RefCell::new(None),
        }
    }

    pub fn snapshot(&self) -> RoomMapSnapshot {
        self.state.borrow().clone()
    }

    pub fn filters(&self) -> MapFilters {
        self.state.borrow().filters.clone()
    }

    /// Merge `update` into the filters and refetch if anything changed.
    ///
    /// Returns whether a fetch was issued.
    pub async fn update_filters(&self, update: MapFiltersUpdate) -> bool {
        let changed = {
            let mut state = self.state.borrow_mut();
            let merged = state.filters.merged(&update);
            if merged == state.filters {
                false
            } else {
                state.filters = merged;
                true
            }
        };
        if changed {
            self.refresh_data().await;
        }
        changed
    }

    /// Fetch grid and statistics for the current filters.
    ///
    /// Failures are kept in the snapshot and notified; the previous grid and
    /// statistics stay in place.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_data(&self) {
        let filters = self.filters();
        let ticket = self.fetches.begin();
        self.state.borrow_mut().error = None;
        let _busy = Busy::start(&self.state, |s| &mut s.is_loading)
            .for_ticket(&self.fetches, ticket);

        let result = futures::try_join!(
            self.api.get_map_data(&filters),
            self.api.get_map_stats(
                filters.start_date,
                filters.end_date,
                filters.property_id,
            ),
        );
        if !self.fetches.is_current(ticket) {
            tracing::debug!("Discarding superseded room map response");
            return;
        }

        match result {
            Ok((map, stats)) => {
                tracing::debug!(rooms = map.room_count(), "Room map loaded");
                let mut state = self.state.borrow_mut();
                state.map = Some(Rc::new(map));
                state.stats = Some(stats);
            }
            Err(e) => {
                let message = display_message(&e, messages::MAP_LOAD);
                tracing::warn!("Failed to load room map: {e}");
                self.state.borrow_mut().error = Some(message.clone());
                self.notifier.destructive(messages::ERROR_TITLE, message);
            }
        }
    }

    /// Submit a bulk status change, then reload grid and statistics with
    /// whatever filters are current once it succeeds.
    #[tracing::instrument(skip(self, operation), fields(rooms = operation.room_ids.len()))]
    pub async fn execute_bulk_operation(
        &self,
        operation: BulkOperation,
    ) -> Result<BulkOperationResult, Error> {
        let result = {
            let _busy = Busy::start(&self.state, |s| &mut s.is_mutating)
                .counted(&self.mutations);
            self.api.execute_bulk_operation(&operation).await
        };

        match result {
            Ok(result) => {
                tracing::info!(
                    affected = result.affected_rooms,
                    "Bulk operation applied"
                );
                self.notifier
                    .success(messages::SUCCESS_TITLE, result.message.clone());
                self.refresh_data().await;
                Ok(result)
            }
            Err(e) => {
                let err = Error::from_client(e, messages::BULK_OPERATION);
                tracing::warn!("Bulk operation failed: {err}");
                self.notifier
                    .destructive(messages::ERROR_TITLE, err.to_string());
                Err(err)
            }
        }
    }

    /// Book a room straight from the map, then reload grid and statistics.
    #[tracing::instrument(skip(self, draft), fields(room = %draft.room_id))]
    pub async fn create_quick_booking(
        &self,
        draft: QuickBookingDraft,
    ) -> Result<BookingRecord, Error> {
        let result = {
            let _busy = Busy::start(&self.state, |s| &mut s.is_mutating)
                .counted(&self.mutations);
            self.api.create_quick_booking(&draft).await
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    reservation = %record.reservation_number,
                    "Quick booking created"
                );
                self.notifier.success(
                    messages::SUCCESS_TITLE,
                    format!(
                        "Reserva {} criada para {} ({} a {})",
                        record.reservation_number,
                        record.guest_name,
                        format_date(record.check_in),
                        format_date(record.check_out),
                    ),
                );
                self.refresh_data().await;
                Ok(record)
            }
            Err(e) => {
                let err = Error::from_client(e, messages::QUICK_BOOKING);
                tracing::warn!("Quick booking failed: {err}");
                self.notifier
                    .destructive(messages::ERROR_TITLE, err.to_string());
                Err(err)
            }
        }
    }

    /// Column headers for the held grid, empty until a grid is loaded.
    ///
    /// Computed once per grid and shared until the next one is applied.
    pub fn date_headers(&self) -> Rc<Vec<DateHeader>> {
        let Some(map) = self.state.borrow().map.clone() else {
            return Rc::new(Vec::new());
        };

        let mut cache = self.headers.borrow_mut();
        if let Some((cached_map, headers)) = cache.as_ref() {
            if Rc::ptr_eq(cached_map, &map) {
                return headers.clone();
            }
        }
        let headers = Rc::new(date_headers(
            map.start_date,
            map.end_date,
            self.time_source.today(),
        ));
        *cache = Some((map, headers.clone()));
        headers
    }
}
