pub mod session;

pub use session::{SessionDefaults, SessionRequest};
