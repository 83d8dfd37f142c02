//! Session cookie handling: value codec and cookie construction.

pub mod codec;
pub mod cookie;

pub use codec::{SessionClaims, SessionVerdict, decode, encode_response, now_unix};
pub use cookie::{SESSION_COOKIE_NAME, clear_session_cookie, session_cookie, session_value};
