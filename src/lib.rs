//! Talent matcher library
//!
//! Turns CVs and project descriptions into structured records, ranks a staff
//! roster against a project and recommends activities from similar people.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod roster;
pub mod scoring;
pub mod session;

pub use config::Config;
pub use error::{Result, TalentMatcherError};
