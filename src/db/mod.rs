pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryLeagueStore;
pub use postgres::PgLeagueStore;
pub use store::{CompetitionStore, FixtureStore, LeagueStore, StoreError, TeamStore};
