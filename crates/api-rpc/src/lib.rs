//! JSON-RPC API Layer
//!
//! Exposes the four queue operations as versioned JSON-RPC 2.0 methods:
//! `jobs.enqueue.v1`, `jobs.list.v1`, `jobs.get.v1`, `jobs.reprioritize.v1`.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
