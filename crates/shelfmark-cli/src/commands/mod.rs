pub mod import;
pub mod resolve;
pub mod statuses;
