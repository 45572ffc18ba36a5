//! Client-side support for GrantFlow front ends.
//!
//! [`GrantClient`] wraps the server's HTTP surface with typed methods;
//! [`SectionEditor`] keeps one writing section synchronized with the server
//! while a user edits it.

mod client;
mod editor;

pub use client::{ClientError, GrantClient};
pub use editor::{EditorEvent, EditorState, SectionEditor};
