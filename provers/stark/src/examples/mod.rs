pub mod fibonacci;
pub mod mimc;

pub use fibonacci::FibonacciAir;
pub use mimc::MiMCAir;
