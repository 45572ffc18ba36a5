mod project;
mod section;

pub use project::*;
pub use section::*;
