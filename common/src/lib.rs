pub mod backoff;
pub mod cache;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod mapping;
pub mod model;
pub mod requests;
pub mod resource;
pub mod route;
pub mod selection;
pub mod session;
pub mod validation;
