//! Clubhouse resource types.

mod category;
mod comment;
mod epic;
mod file;
mod label;
mod member;
mod milestone;
mod project;
mod repository;
mod search;
mod story;
mod story_link;
mod team;

pub use category::*;
pub use comment::*;
pub use epic::*;
pub use file::*;
pub use label::*;
pub use member::*;
pub use milestone::*;
pub use project::*;
pub use repository::*;
pub use search::*;
pub use story::*;
pub use story_link::*;
pub use team::*;
