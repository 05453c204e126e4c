//! Use-cases — declaring fapis and loading them.

pub mod fapis_service;
pub mod loader;

#[cfg(test)]
pub(crate) mod test_support;
