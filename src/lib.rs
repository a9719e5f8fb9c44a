pub mod arena;
pub mod bot;
pub mod game;
pub mod piece;

pub use arena::*;
pub use bot::*;
pub use game::*;
pub use piece::*;
