//! Game domain - tracked game catalogue

mod game_repository;
mod game_validator;

pub use game_repository::GameRepository;
pub use game_validator::GameValidator;
