//! # Spindle Core
//!
//! Core abstractions and traits for the Spindle task-execution runtime.
//!
//! Spindle is a thread pool offering two competing load-distribution policies —
//! work stealing and work balancing — over the same primitive: one mutex-guarded
//! double-ended queue per worker. This crate holds the pieces shared by both
//! policies: the [`Runnable`] task capability, the [`ExecutorService`] contract,
//! pool configuration, and the error taxonomy.
//!
//! ## Design Principles
//!
//! - **Typed tasks**: anything runnable is expressed through the [`Runnable`]
//!   trait, so an unschedulable value is a compile-time error rather than a
//!   runtime dispatch failure
//! - **Fail fast**: invalid configuration is rejected at construction, never at
//!   first submission
//! - **Small contract**: the executor surface is submit and shutdown; result
//!   plumbing belongs to the caller

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod executor;
pub mod task;

pub use config::PoolConfig;
pub use error::{DequeError, DequeResult, ExecutorError, ExecutorResult};
pub use executor::{ExecutorService, ExecutorServiceExt};
pub use task::Runnable;
