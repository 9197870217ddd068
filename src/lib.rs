pub mod config;
pub mod domain;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
