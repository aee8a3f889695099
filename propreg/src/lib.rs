#![deny(unsafe_op_in_unsafe_fn)]

// Runtime property registry. Fields announce themselves through
// a marker placed right before them, the registry finds them by
// scanning an object's address range and shows/edits them through
// type erased inspectors

mod address;
mod console;
mod descriptor;
mod error;
mod inspected;
mod inspector;
mod marker;
pub mod registry;

// Publicize the API
pub use address::{align_up, alignment_of, field_offset, Address};
pub use console::{Console, StdConsole, StreamConsole};
pub use descriptor::{Inspectable, PropertyDescriptor, PropertyInfo, PropertyLayout};
pub use error::InspectError;
pub use inspected::Inspected;
pub use inspector::{TypeInspector, ValueInspector};
pub use marker::PropertyMarker;
pub use registry::{PropertyRegistry, Registry, Selection};
