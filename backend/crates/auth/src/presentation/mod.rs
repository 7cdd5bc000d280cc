//! Presentation Layer
//!
//! Session cookie helpers and the request extractor. Routes live in the
//! consuming application.

pub mod cookie;
pub mod extract;

pub use cookie::{clear_session_cookie, session_cookie};
pub use extract::CurrentSession;
