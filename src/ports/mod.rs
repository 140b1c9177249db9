//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the client core and an
//! external system (time, the remote content API).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod contents;

pub use clock::Clock;
pub use contents::{
    ContentsFuture, DeleteFile, FileContent, FileEntry, PutFile, RepoContents, RepoRef, Token,
};
