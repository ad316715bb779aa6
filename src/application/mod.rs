pub mod catalog;
pub mod convert;
pub mod error;
pub mod job;
