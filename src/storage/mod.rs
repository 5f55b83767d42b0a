#[cfg(test)]
mod memory;
mod models;
mod postgres;
mod store;

#[cfg(test)]
pub use self::memory::MemoryStore;
pub use self::{
    models::PostRow,
    postgres::{DBPool, migrate, new_db_pool},
    store::PostStore,
};
