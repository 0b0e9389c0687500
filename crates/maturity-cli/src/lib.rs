//! Terminal front end for the maturity assessment
//!
//! Wires configuration, logging and a line-oriented console onto the
//! wizard controller from `maturity-core` and the PDF pipeline from
//! `maturity-report`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod console;
pub mod logging;

pub use config::{AppConfig, ConfigError};
pub use console::{Console, ConsoleError, Outcome};
