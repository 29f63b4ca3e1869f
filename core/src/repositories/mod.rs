pub mod denylist;

pub use denylist::{InMemoryDenylist, NoOpDenylist, TokenDenylist};
