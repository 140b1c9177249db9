//! Live adapters for real external interactions.

pub mod clock;
pub mod contents;

pub use clock::LiveClock;
pub use contents::LiveRepoContents;
