pub mod errors;
pub mod factory;
pub mod models;
pub mod ports;
pub mod service;
