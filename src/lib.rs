//! quakefeed: polls the USGS earthquake feed and mirrors it into PostgreSQL.

pub mod cli;
pub mod config;
pub mod constants;
pub mod database;
pub mod datafeed;
pub mod error;
pub mod logging;

#[cfg(test)]
pub mod test_utils;
