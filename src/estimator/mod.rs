//! Parameter capture and message-total computation.
//!
//! A [`Session`] records what the user picked; [`Estimator::compute`] turns
//! that into an [`Estimate`] from scratch every time it is called.

mod compute;
mod params;
mod session;

pub use compute::*;
pub use params::*;
pub use session::Session;
