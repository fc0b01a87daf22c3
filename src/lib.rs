#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Deterministic hash codes for table keys.
///
/// This module provides the [`HashCode`] trait the table uses to place keys,
/// with implementations for integers, strings and the null key (`None`).
pub mod hash_code;

pub mod hash_table;

#[cfg(feature = "std")]
pub mod config;

/// Workload error type.
#[cfg(feature = "std")]
pub mod error;

#[cfg(feature = "std")]
pub mod records;

#[cfg(feature = "std")]
pub mod salary;

/// A common interface over the chained table and the reference maps.
///
/// This module provides [`KeyValueStore`](store::KeyValueStore) and the
/// containers it is implemented for.
#[cfg(feature = "std")]
pub mod store;

#[cfg(feature = "std")]
pub mod timing;

#[cfg(feature = "std")]
pub use config::Config;
#[cfg(feature = "std")]
pub use error::Error;
#[cfg(feature = "std")]
pub use error::Result;
pub use hash_code::HashCode;
pub use hash_table::CAPACITY;
pub use hash_table::ChainedHashTable;
#[cfg(feature = "std")]
pub use store::KeyValueStore;
#[cfg(feature = "std")]
pub use store::StoreKind;
