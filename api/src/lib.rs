pub mod config;
pub mod error;
pub mod handlers;
pub mod listing_service;
pub mod logging_middleware;
pub mod metrics;
pub mod metrics_handler;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod state;
pub mod validation;
