pub mod fred;
pub mod newton;
pub mod yahoo_finance;
