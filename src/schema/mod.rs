pub mod control;
pub mod example;
pub mod model;
pub mod properties;

pub use control::*;
pub use example::*;
pub use model::*;
pub use properties::*;
