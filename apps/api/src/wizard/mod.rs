//! Wizard: the upload -> job -> results flow, one in-memory session per visitor.

pub mod demo;
pub mod handlers;
pub mod session;
pub mod step;
pub mod view;

pub use session::{spawn_sweeper, SessionStore};
