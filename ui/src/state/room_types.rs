//! State behind the room type listing: filters, pagination, the current
//! page and a rollup of that page.

use std::cell::RefCell;

use payloads::{
    RoomTypeId,
    requests::{RoomTypeFilters, RoomTypeQuery},
    responses::{RoomTypePage, RoomTypeSummary},
};

use super::{Busy, RequestSequence};
use crate::{
    BookingApi,
    contexts::toast::Notifier,
    error::{Error, messages},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: u32,
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
}

impl From<&RoomTypePage> for Pagination {
    fn from(page: &RoomTypePage) -> Self {
        Self {
            total: page.total,
            page: page.page,
            pages: page.pages,
            per_page: page.per_page,
        }
    }
}

/// Rollup of the room types on the current page only. It is not a
/// property-wide aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomTypeStats {
    pub total: usize,
    pub bookable: usize,
    /// Mean of `max_capacity`, rounded to one decimal. Zero for an empty
    /// page.
    pub average_capacity: f64,
}

pub fn page_stats(room_types: &[RoomTypeSummary]) -> RoomTypeStats {
    let total = room_types.len();
    let bookable = room_types.iter().filter(|rt| rt.is_bookable).count();
    let average_capacity = if total == 0 {
        0.0
    } else {
        let capacity: u32 = room_types.iter().map(|rt| rt.max_capacity).sum();
        (f64::from(capacity) / total as f64 * 10.0).round() / 10.0
    };
    RoomTypeStats {
        total,
        bookable,
        average_capacity,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomTypesSnapshot {
    pub filters: RoomTypeFilters,
    pub page: u32,
    pub per_page: u32,
    pub room_types: Vec<RoomTypeSummary>,
    pub pagination: Option<Pagination>,
    pub stats: Option<RoomTypeStats>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Everything that decides which page is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingKey {
    filters: RoomTypeFilters,
    page: u32,
    per_page: u32,
}

pub struct RoomTypesState<A, N> {
    api: A,
    notifier: N,
    state: RefCell<RoomTypesSnapshot>,
    /// Key of the most recent load, whether or not it succeeded.
    loaded_key: RefCell<Option<ListingKey>>,
    loads: RequestSequence,
}

impl<A: BookingApi, N: Notifier> RoomTypesState<A, N> {
    pub fn new(api: A, notifier: N, per_page: u32) -> Self {
        Self {
            api,
            notifier,
            state: RefCell::new(RoomTypesSnapshot {
                filters: RoomTypeFilters::default(),
                page: 1,
                per_page: per_page.max(1),
                room_types: Vec::new(),
                pagination: None,
                stats: None,
                is_loading: false,
                error: None,
            }),
            loaded_key: RefCell::new(None),
            loads: RequestSequence::default(),
        }
    }

    pub fn snapshot(&self) -> RoomTypesSnapshot {
        self.state.borrow().clone()
    }

    fn key(&self) -> ListingKey {
        let state = self.state.borrow();
        ListingKey {
            filters: state.filters.clone(),
            page: state.page,
            per_page: state.per_page,
        }
    }

    /// Replace the filters. Goes back to the first page.
    pub fn set_filters(&self, filters: RoomTypeFilters) {
        let mut state = self.state.borrow_mut();
        state.filters = filters;
        state.page = 1;
    }

    pub fn clear_filters(&self) {
        self.set_filters(RoomTypeFilters::default());
    }

    pub fn set_page(&self, page: u32) {
        self.state.borrow_mut().page = page.max(1);
    }

    /// Change the page size. Goes back to the first page.
    pub fn set_per_page(&self, per_page: u32) {
        let mut state = self.state.borrow_mut();
        state.per_page = per_page.max(1);
        state.page = 1;
    }

    /// Load the page selected by the current filters, page and page size,
    /// unless that exact page was the last one loaded.
    ///
    /// Returns whether a load was issued.
    pub async fn reload_if_changed(&self) -> bool {
        if self.loaded_key.borrow().as_ref() == Some(&self.key()) {
            return false;
        }
        self.load().await;
        true
    }

    /// Load the current page. A failure clears the listing entirely rather
    /// than leaving a page that no longer matches the filters.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) {
        let key = self.key();
        let query = RoomTypeQuery::new(key.page, key.per_page, &key.filters);
        *self.loaded_key.borrow_mut() = Some(key);

        let ticket = self.loads.begin();
        self.state.borrow_mut().error = None;
        let _busy = Busy::start(&self.state, |s| &mut s.is_loading)
            .for_ticket(&self.loads, ticket);

        let result = self.api.get_room_types(&query).await;
        if !self.loads.is_current(ticket) {
            tracing::debug!("Discarding superseded room type page");
            return;
        }

        let mut state = self.state.borrow_mut();
        match result {
            Ok(page) => {
                tracing::debug!(
                    count = page.room_types.len(),
                    total = page.total,
                    "Room types loaded"
                );
                state.pagination = Some(Pagination::from(&page));
                state.stats = Some(page_stats(&page.room_types));
                state.room_types = page.room_types;
            }
            Err(e) => {
                let err = Error::from_client(e, messages::ROOM_TYPES_LOAD);
                tracing::warn!("Failed to load room types: {err}");
                state.room_types = Vec::new();
                state.pagination = None;
                state.stats = None;
                state.error = Some(err.to_string());
            }
        }
    }

    /// Flip whether a room type can be booked publicly, then reload the
    /// page.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_bookable(
        &self,
        id: RoomTypeId,
    ) -> Result<RoomTypeSummary, Error> {
        match self.api.toggle_room_type_bookable(id).await {
            Ok(room_type) => {
                let description = if room_type.is_bookable {
                    format!("{} agora está disponível para reserva", room_type.name)
                } else {
                    format!(
                        "{} não está mais disponível para reserva",
                        room_type.name
                    )
                };
                self.notifier.success(messages::SUCCESS_TITLE, description);
                self.load().await;
                Ok(room_type)
            }
            Err(e) => {
                let err = Error::from_client(e, messages::TOGGLE_BOOKABLE);
                tracing::warn!("Failed to toggle room type: {err}");
                self.notifier
                    .destructive(messages::ERROR_TITLE, err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a room type, then reload the page. Deleting the last row of a
    /// page leaves the page short until the next load; the page number is
    /// not adjusted.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RoomTypeId) -> Result<(), Error> {
        match self.api.delete_room_type(id).await {
            Ok(()) => {
                self.notifier.success(
                    messages::SUCCESS_TITLE,
                    "Tipo de quarto excluído com sucesso",
                );
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let err = Error::from_client(e, messages::DELETE_ROOM_TYPE);
                tracing::warn!("Failed to delete room type: {err}");
                self.notifier
                    .destructive(messages::ERROR_TITLE, err.to_string());
                Err(err)
            }
        }
    }
}
