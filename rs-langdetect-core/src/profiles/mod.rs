//! Persistence of language profiles.
//!
//! - `codec`: textual form of one profile (reader / writer)
//! - `store`: where profile bytes come from (folder, memory)
//! - `loader`: bulk, all-or-nothing loading by language identifier

pub mod codec;
pub mod loader;
pub mod store;

pub use codec::{ProfileReader, ProfileWriter};
pub use loader::{ProfileLoader, Resolver};
pub use store::{DirectoryStore, MemoryStore, ProfileStore};
