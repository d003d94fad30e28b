pub mod config;
pub mod contracts;
pub mod errors;
pub mod session;

pub use errors::{AuthFailure, SubmissionFailure};
pub use session::{Session, SessionState, UserProfile};
