pub mod board;
pub mod calendar;
pub mod filter;
pub mod lifecycle;
pub mod queue;
pub mod scheduling;
