//! Source of "now" for relative windows and humanized output.

use chrono::{Local, NaiveDateTime};

/// Something that knows the current local wall-clock time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// The current moment, as a local naive date-time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local time on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
