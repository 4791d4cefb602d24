//! In-process storage for games and price snapshots

mod game_store;
mod price_store;

pub use game_store::InMemoryGameRepository;
pub use price_store::InMemoryPriceStore;
