//! Multi-modal route planner server for Valencia.
//!
//! A web application that answers: "How do I get from here to there on
//! foot, by car, on a Valenbisi bike or by bus, and how long will it take?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod opendata;
pub mod ors;
pub mod planner;
pub mod spatial;
pub mod status;
pub mod web;
