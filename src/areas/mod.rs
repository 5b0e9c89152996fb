pub mod commit_store;
pub mod index;
pub mod object_store;
pub mod refs;
pub mod repository;
pub mod workspace;
