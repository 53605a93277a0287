//! SchemaScope library.
//!
//! Connects to `PostgreSQL`, creates the `app` and `auth` schemas,
//! auto-migrates `auth.user` and `app.order`, inserts one user and one order
//! owned by it, then reads back all users, all orders, and all orders with
//! their owner preloaded.
//!
//! The binary in `main.rs` is a thin wrapper; everything it does is exposed
//! here so the integration tests can drive a run against a live database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod output;
pub mod run;
