pub mod error;
pub mod memory;
pub mod store;

pub use common::EntityId;
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use store::{Entity, EntityStore, Removal};
