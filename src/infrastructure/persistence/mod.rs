//! Persistence implementations

pub mod memory;
#[cfg(feature = "postgres")]
pub mod database;
#[cfg(feature = "postgres")]
pub mod invitation_repository;

pub use memory::InMemoryInvitationRepository;
#[cfg(feature = "postgres")]
pub use database::{create_pool, run_migrations, PoolConfig};
#[cfg(feature = "postgres")]
pub use invitation_repository::PgInvitationRepository;
