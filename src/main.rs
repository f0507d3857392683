// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example overfit --release
fn main() {
    println!("fcnet: a fully-connected softmax classifier with dropout and L2, from scratch.");
    println!("Run `cargo run --example overfit` to watch it memorize a synthetic batch.");
}
