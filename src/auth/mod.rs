pub mod authorization;
pub mod jwt;
pub mod middleware;

pub use authorization::{Identity, Participants};
