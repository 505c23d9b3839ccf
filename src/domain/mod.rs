pub mod medicine;
pub mod order;
pub mod pharmacy;
pub mod supplier;

pub use medicine::*;
pub use order::*;
pub use pharmacy::*;
pub use supplier::*;
