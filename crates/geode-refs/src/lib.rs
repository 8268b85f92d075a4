//! Named reference management for Geode.
//!
//! References are mutable named pointers into the immutable object store: a
//! branch head, the current commit (`HEAD`), or the root tree of the live
//! working snapshot (`WORK_HEAD`). A reference whose target is the null
//! object id exists but is *unborn* -- the name is registered, but there is
//! no content behind it yet.

pub mod error;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, Result};
pub use memory::InMemoryRefStore;
pub use traits::RefStore;
pub use types::{Ref, HEAD, WORK_HEAD};
