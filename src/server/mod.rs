//! TCP listener and request routing.

pub mod listener;
pub mod router;

pub use listener::{Acceptor, run, serve};
pub use router::{Route, Router};
