//! Pollwise - Survey Authoring and Response Collection Backend
//!
//! Authors design surveys of ordered questions and options; respondents
//! answer one question at a time across a session; authors read aggregated
//! statistics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
