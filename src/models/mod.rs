pub mod enums;
pub mod patient;
pub mod reading;

pub use enums::*;
pub use patient::*;
pub use reading::*;
