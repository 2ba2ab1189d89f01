//! Calendar utilities for local-day bookkeeping.
//!
//! # Responsibility
//! - Convert between local-midnight instants and canonical date keys.
//! - Provide leap-aware day arithmetic and month lengths.
//! - Supply a fresh "today" per operation through [`Clock`].

mod clock;
mod date_key;

pub use clock::{today, Clock, FixedClock, SystemClock};
pub use date_key::{
    add_days, days_in_month, format_display_date, parse_date_key, to_date_key, DateKey,
    DateKeyError,
};
