pub mod element;
pub mod snapshot;
pub mod value;

pub use element::{ElementId, ElementRecord, Position};
pub use snapshot::Snapshot;
pub use value::ParamValue;
