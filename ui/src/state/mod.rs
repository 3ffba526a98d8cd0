//! Orchestration units, one per screen.
//!
//! Every unit follows the same shape: operations take `&self`, set a busy
//! flag, call the API, then replace the held data in one step. Held data is
//! read through a cloned snapshot.
//!
//! Overlapping calls of the same kind are sequenced: each call takes a
//! ticket and a response is only applied if no newer call has started
//! since. Busy flags are released by [`Busy`] on drop, so they clear on
//! every exit path including a dropped future. Writes that may overlap
//! count their calls and keep the flag up until the last one ends.

pub mod booking;
pub mod room_map;
pub mod room_types;

pub use booking::{BookingSnapshot, BookingState, SearchOutcome};
pub use room_map::{RoomMapSnapshot, RoomMapState};
pub use room_types::{
    Pagination, RoomTypeStats, RoomTypesSnapshot, RoomTypesState,
};

use std::cell::{Cell, RefCell};

/// Hands out increasing tickets for one kind of request.
#[derive(Debug, Default)]
pub(crate) struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn begin(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Supersede whatever is in flight without starting anything new.
    pub fn invalidate(&self) {
        self.begin();
    }
}

/// Who decides when a busy flag comes down.
enum Release<'a> {
    /// The guard alone.
    Always,
    /// Only if the ticket is still the newest.
    IfCurrent(&'a RequestSequence, u64),
    /// The last of several overlapping calls.
    LastOf(&'a Cell<u32>),
}

/// Holds a busy flag up for as long as it lives.
///
/// When tied to a ticket, the flag is only released if the ticket is still
/// current; otherwise the newer request owns it. When shared through a
/// counter, the flag stays up until every overlapping call has finished.
pub(crate) struct Busy<'a, S> {
    state: &'a RefCell<S>,
    flag: fn(&mut S) -> &mut bool,
    release: Release<'a>,
}

impl<'a, S> Busy<'a, S> {
    pub fn start(state: &'a RefCell<S>, flag: fn(&mut S) -> &mut bool) -> Self {
        *flag(&mut state.borrow_mut()) = true;
        Self {
            state,
            flag,
            release: Release::Always,
        }
    }

    pub fn for_ticket(
        mut self,
        sequence: &'a RequestSequence,
        ticket: u64,
    ) -> Self {
        self.release = Release::IfCurrent(sequence, ticket);
        self
    }

    pub fn counted(mut self, in_flight: &'a Cell<u32>) -> Self {
        in_flight.set(in_flight.get() + 1);
        self.release = Release::LastOf(in_flight);
        self
    }
}

impl<S> Drop for Busy<'_, S> {
    fn drop(&mut self) {
        let owned = match self.release {
            Release::Always => true,
            Release::IfCurrent(sequence, ticket) => sequence.is_current(ticket),
            Release::LastOf(in_flight) => {
                let remaining = in_flight.get().saturating_sub(1);
                in_flight.set(remaining);
                remaining == 0
            }
        };
        if !owned {
            return;
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            *(self.flag)(&mut state) = false;
        }
    }
}
