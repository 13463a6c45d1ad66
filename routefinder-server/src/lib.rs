//! Route finder server.
//!
//! An interactive map that answers: "from the point I clicked, which
//! nearby point of interest is fastest to reach on foot, by car and by
//! truck, and which way do I go?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod geodata;
pub mod interaction;
pub mod nearest;
pub mod ors;
pub mod route;
pub mod travel;
pub mod view;
pub mod web;

pub use config::AppConfig;
