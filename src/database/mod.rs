pub mod changeset;
pub mod pool;
