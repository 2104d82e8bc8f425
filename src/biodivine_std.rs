//! Small general-purpose building blocks shared by the rest of the crate: a marker trait for
//! states of a dynamical system, a dense integer state encoding and a bit vector
//! abstraction.

pub mod bitvector;
pub mod structs;
pub mod traits;
