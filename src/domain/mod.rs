//! Domain layer - core business logic and entities

pub mod game;
pub mod notification;
pub mod price;
