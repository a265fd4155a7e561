pub mod activity;
pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod manager;
pub mod services;
pub mod store;
