mod pool;

pub use pool::{create_pool, migrate};

#[cfg(test)]
pub use pool::test_pool;
