pub mod date_range;
pub mod observation;
pub mod profile;
pub mod season;
