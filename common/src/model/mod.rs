pub mod client;
pub mod connector;
pub mod interface;
pub mod mapping;
pub mod monitoring;
pub mod page;
pub mod user;
