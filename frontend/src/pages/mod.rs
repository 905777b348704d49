pub mod audit_logs;
pub mod clients;
pub mod connectors;
pub mod home;
pub mod interfaces;
pub mod login;
pub mod monitoring;
pub mod transform;
pub mod users;
