//! Service tier: validation and orchestration over the repository traits.
//!
//! One service per entity. Services hold an `Arc<dyn ...Repository>` so the
//! same code runs against PostgreSQL in production and the in-memory store
//! in tests.

pub mod character;
pub mod faction;
pub mod race;

pub use character::CharacterService;
pub use faction::FactionService;
pub use race::RaceService;
