//! Skill Octagon - skill profile store for octagon skill charts
//!
//! Users rate themselves on eight fixed skills, save the ratings as named
//! profiles, merge two profiles into an averaged view, and move everything
//! between installs through JSON export and import.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
