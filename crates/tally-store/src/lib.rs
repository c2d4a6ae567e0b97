//! # tally-store
//!
//! Persistence and orchestration for Tally.
//!
//! Collections live in a per-profile key-value store as one JSON array per
//! key. [`repository::Repository`] gives typed get-all / get / append /
//! remove / replace-all access over any [`store::KeyValueStore`] backend and
//! publishes a [`feed::ChangeEvent`] after every write. A [`feed::Poller`]
//! detects writes made by other processes by fingerprinting the stored text.
//!
//! [`service::TallyService`] ties the audit and schedule repositories to the
//! pure computations in `tally-core`. Repository methods are added to it via
//! `impl TallyService` blocks in [`repos`].
//!
//! Store I/O is synchronous. Writes are read-modify-write of the whole
//! collection; the last writer wins.

pub mod error;
pub mod feed;
pub mod repos;
pub mod repository;
pub mod service;
pub mod store;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::StoreError;
pub use service::TallyService;
