pub mod estimate;
pub mod market;
pub mod setup;
pub mod ui;
