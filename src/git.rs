//! Git access: staged diffs, commit logs and committing.

pub mod repository;

pub use repository::GitRepository;
