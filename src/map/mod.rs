pub mod geo;
pub mod marker;
pub mod presenter;
pub mod widget;

pub use geo::*;
pub use marker::*;
pub use presenter::*;
pub use widget::*;
