pub mod mock;
pub mod repository;
pub mod sqlite;
