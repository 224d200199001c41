// Session state
// One in-memory state per user, changed only through whole-state transitions.

pub mod handlers;
pub mod state;
pub mod store;
pub mod submit;

pub use store::SessionStore;
