//! State behind the public booking wizard: property header, availability
//! search, room selection and booking submission.

use std::cell::RefCell;

use payloads::{
    requests::{BookingDraft, SearchCriteria},
    responses::{AvailableRoom, BookingRecord, PropertyInfo},
};

use super::{Busy, RequestSequence};
use crate::{
    BookingApi,
    error::{Error, messages},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingSnapshot {
    pub slug: String,
    pub property: Option<PropertyInfo>,
    pub is_loading_property: bool,
    /// Criteria of the last successful search, or the defaults.
    pub criteria: SearchCriteria,
    pub available_rooms: Vec<AvailableRoom>,
    pub is_searching: bool,
    pub has_searched: bool,
    pub selected_room: Option<AvailableRoom>,
    pub booking: Option<BookingRecord>,
    pub is_submitting: bool,
    pub error: Option<String>,
}

impl BookingSnapshot {
    /// The wizard shows its confirmation step once a booking exists.
    pub fn is_confirmed(&self) -> bool {
        self.booking.is_some()
    }
}

/// What became of a search that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response replaced the held results.
    Applied,
    /// A newer search or a reset took over; the response, successful or
    /// not, was dropped.
    Superseded,
}

pub struct BookingState<A> {
    api: A,
    state: RefCell<BookingSnapshot>,
    searches: RequestSequence,
}

impl<A: BookingApi> BookingState<A> {
    pub fn new(api: A, slug: impl Into<String>) -> Self {
        Self {
            api,
            state: RefCell::new(BookingSnapshot {
                slug: slug.into(),
                ..BookingSnapshot::default()
            }),
            searches: RequestSequence::default(),
        }
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        self.state.borrow().clone()
    }

    /// Fetch the public property info. Later searches go to this property.
    #[tracing::instrument(skip(self))]
    pub async fn load_property(&self, slug: &str) -> Result<PropertyInfo, Error> {
        {
            let mut state = self.state.borrow_mut();
            state.slug = slug.to_string();
            state.error = None;
        }
        let _busy = Busy::start(&self.state, |s| &mut s.is_loading_property);

        match self.api.get_property_info(slug).await {
            Ok(property) => {
                self.state.borrow_mut().property = Some(property.clone());
                Ok(property)
            }
            Err(e) => {
                let err = Error::from_client(e, messages::PROPERTY_LOAD);
                tracing::warn!("Failed to load property: {err}");
                self.state.borrow_mut().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Search availability. Invalid criteria are rejected without calling
    /// the API. Results of a search superseded by a newer one are dropped,
    /// and the caller is told so.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        criteria: SearchCriteria,
    ) -> Result<SearchOutcome, Error> {
        let query = match criteria.to_query() {
            Ok(query) => query,
            Err(invalid) => {
                let message = invalid
                    .error_message()
                    .unwrap_or(messages::INVALID_SEARCH)
                    .to_string();
                tracing::debug!(?invalid, "Search rejected");
                self.state.borrow_mut().error = Some(message.clone());
                return Err(Error::Validation(message));
            }
        };

        // never show the previous results while a new search runs
        let slug = {
            let mut state = self.state.borrow_mut();
            state.available_rooms.clear();
            state.selected_room = None;
            state.error = None;
            state.slug.clone()
        };
        let ticket = self.searches.begin();
        let _busy = Busy::start(&self.state, |s| &mut s.is_searching)
            .for_ticket(&self.searches, ticket);

        let result = self.api.search_availability(&slug, &query).await;
        if !self.searches.is_current(ticket) {
            tracing::debug!("Discarding superseded search response");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok(response) => {
                tracing::debug!(
                    rooms = response.available_rooms.len(),
                    "Search complete"
                );
                let mut state = self.state.borrow_mut();
                state.available_rooms = response.available_rooms;
                state.criteria = criteria;
                state.has_searched = true;
                Ok(SearchOutcome::Applied)
            }
            Err(e) => {
                let err = Error::from_client(e, messages::SEARCH);
                tracing::warn!("Availability search failed: {err}");
                self.state.borrow_mut().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn select_room(&self, room: Option<AvailableRoom>) {
        self.state.borrow_mut().selected_room = room;
    }

    #[tracing::instrument(skip(self, draft), fields(room_type = %draft.room_type_id))]
    pub async fn submit_booking(
        &self,
        draft: BookingDraft,
    ) -> Result<BookingRecord, Error> {
        self.state.borrow_mut().error = None;
        let _busy = Busy::start(&self.state, |s| &mut s.is_submitting);

        match self.api.create_booking(&draft).await {
            Ok(record) => {
                tracing::info!(
                    reservation = %record.reservation_number,
                    "Booking created"
                );
                self.state.borrow_mut().booking = Some(record.clone());
                Ok(record)
            }
            Err(e) => {
                let err = Error::from_client(e, messages::BOOKING);
                tracing::warn!("Booking submission failed: {err}");
                self.state.borrow_mut().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Drop the search results and selection. A search still in flight is
    /// abandoned.
    pub fn reset_search(&self) {
        self.searches.invalidate();
        let mut state = self.state.borrow_mut();
        state.available_rooms.clear();
        state.selected_room = None;
        state.has_searched = false;
        state.is_searching = false;
        state.error = None;
    }

    /// Back to an empty wizard for the same property.
    pub fn reset_all(&self) {
        self.reset_search();
        let mut state = self.state.borrow_mut();
        state.booking = None;
        state.criteria = SearchCriteria::default();
    }
}
