use sealed::sealed;

use crate::address::Address;

// NOTE: This type is considered to be part of public API
//
// Decides whether a marker belongs to [base, base + extent]
// range of an object
#[sealed]
pub trait RangeBound {
  fn contains(base: Address, extent: usize, marker: Address) -> bool;
}

// base <= marker < base + extent, the default as a marker at
// base + extent belongs to whatever follows the object
// NOTE: This type is considered to be part of public API
pub struct HalfOpen {}
#[sealed]
impl RangeBound for HalfOpen {
  fn contains(base: Address, extent: usize, marker: Address) -> bool {
    marker >= base && marker.get() - base.get() < extent
  }
}

// base <= marker <= base + extent, also matches a marker
// sitting one past the end of the object
// NOTE: This type is considered to be part of public API
pub struct Closed {}
#[sealed]
impl RangeBound for Closed {
  fn contains(base: Address, extent: usize, marker: Address) -> bool {
    marker >= base && marker.get() - base.get() <= extent
  }
}
