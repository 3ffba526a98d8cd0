use jiff::civil::Date;
#[cfg(feature = "mock-time")]
use std::{cell::Cell, rc::Rc};

/// Where "today" comes from. With `mock-time` the date is pinned and can be
/// moved by tests.
#[derive(Clone)]
pub struct TimeSource {
    #[cfg(feature = "mock-time")]
    today: Rc<Cell<Date>>,
}

impl TimeSource {
    #[allow(clippy::new_without_default)]
    #[cfg(not(feature = "mock-time"))]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(feature = "mock-time")]
    pub fn new(today: Date) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    /// Today's date in the system time zone.
    #[cfg(not(feature = "mock-time"))]
    pub fn today(&self) -> Date {
        jiff::Zoned::now().date()
    }

    #[cfg(feature = "mock-time")]
    pub fn today(&self) -> Date {
        self.today.get()
    }

    #[cfg(feature = "mock-time")]
    pub fn advance_days(&self, days: i64) {
        let today = self.today.get();
        self.today
            .set(today.saturating_add(jiff::Span::new().days(days)));
    }

    #[cfg(feature = "mock-time")]
    pub fn set(&self, today: Date) {
        self.today.set(today);
    }
}
