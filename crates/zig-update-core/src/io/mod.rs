//! IO modules - side effects (network, filesystem)

pub mod download;
pub mod extract;
pub mod index;
pub mod prepare;

#[cfg(test)]
pub(crate) mod fixtures;
