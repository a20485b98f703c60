mod prepare_env;

#[cfg(test)]
pub mod mocks;

pub use prepare_env::prepare_test_env;
