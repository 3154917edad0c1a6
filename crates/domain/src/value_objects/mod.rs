//! Value objects for the domain layer

mod clock_time;

pub use clock_time::ClockTime;
