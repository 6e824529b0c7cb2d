//! Core taskpad library (config, credential store, service client, session,
//! task list).

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod session;
pub mod tasks;
