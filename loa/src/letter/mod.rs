//! Letter session state machine and transcript
//!
//! A [`LetterSession`] owns the conversational transcript and the single
//! current letter text, and mediates every call to the text-generation
//! service.

mod params;
mod session;

pub use params::LetterParams;
pub use session::{LetterSession, SessionError, Turn};
