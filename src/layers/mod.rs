pub mod dropout;
pub mod linear;

pub use dropout::{Dropout, Mode};
pub use linear::{linear_forward, linear_backward, LinearGrads};
