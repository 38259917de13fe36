pub mod catalog;
pub mod config;
pub mod dialog;
pub mod error;
pub mod models;
pub mod resource;
pub mod session;
pub mod share;
