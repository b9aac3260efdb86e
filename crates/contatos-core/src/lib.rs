//! Core library for contatos (config, auth gateway, contact store, session).

pub mod auth;
pub mod backend;
pub mod config;
pub mod logging;
pub mod models;
pub mod observable;
pub mod session;
pub mod store;
