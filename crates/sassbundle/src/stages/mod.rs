//! Concrete pipeline stages for the Sass bundle task.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Stages run in the order the task assembles them: compile, rebase,
//! flatten, inline, rename, write.

mod compile;
mod inline;
mod paths;
mod write;

pub use compile::CompileStage;
pub use inline::InlineStage;
pub use paths::{FlattenStage, RebaseStage, RenameStage};
pub use write::WriteStage;
