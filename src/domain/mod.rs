pub mod bill;
pub mod coerce;
pub mod sweet;

pub use bill::*;
pub use sweet::*;
