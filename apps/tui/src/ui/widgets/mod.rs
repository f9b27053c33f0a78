pub mod charts;
pub mod pending;
pub mod popup;
pub mod tables;
