/// CSV export of the hourly dispatch.
pub mod export;
