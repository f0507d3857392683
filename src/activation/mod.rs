pub mod relu;

pub use relu::{relu_forward, relu_backward};
