//! Shared types for the courtbook backend

#[macro_use]
extern crate tracing;

mod error;

pub use error::*;

pub type DbPool = deadpool_diesel::postgres::Pool;
pub type DbConn = deadpool_diesel::postgres::Object;
pub type RedisConn = redis::aio::MultiplexedConnection;
