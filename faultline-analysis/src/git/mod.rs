//! git2-backed repository access.

pub mod repo;

pub use repo::GitRepo;
