mod record_controller;

pub use record_controller::{configure, NEXT_CURSOR_HEADER, TOTAL_COUNT_HEADER};
