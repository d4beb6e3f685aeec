mod service;
mod traits;

#[cfg(test)]
mod service_tests;

pub(crate) use service::*;
pub(crate) use traits::*;
