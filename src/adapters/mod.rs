// Adapters layer: concrete session stores behind the SessionStore port.

pub mod session_store;

pub use session_store::{FileSessionStore, MemorySessionStore};
