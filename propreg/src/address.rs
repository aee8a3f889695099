use std::{fmt, mem, num::NonZeroUsize, ptr};

// NOTE: This type is considered to be part of public API
//
// Opaque integer identity of a location in memory. For markers
// living inside an `Inspected<T>` it is a real exposed address,
// the registry itself never dereferences it
//
// Address arithmetic wraps around the address space and never
// panics, range checks only ever subtract from an address known
// to be not smaller
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Address(pub usize);

impl Address {
  // Exposes provenance of 'value' so inspectors can later
  // turn the address back into a pointer
  pub fn of<T>(value: &T) -> Self {
    Self(ptr::from_ref(value).expose_provenance())
  }

  // Same as 'of' but exposes a pointer which is allowed to write
  pub fn of_mut<T>(value: &mut T) -> Self {
    Self(ptr::from_mut(value).expose_provenance())
  }

  #[must_use]
  pub fn get(self) -> usize {
    self.0
  }

  #[must_use]
  pub fn offset(self, bytes: usize) -> Self {
    Self(self.0.wrapping_add(bytes))
  }

  // Where a field of 'alignment' placed right after 'size' bytes
  // starting at this address begins
  #[must_use]
  pub fn field_after(self, size: usize, alignment: NonZeroUsize) -> Self {
    Self(field_offset(self.0, size, alignment.get()))
  }

  // The pointer is only usable for writing if the address was
  // obtained through Address::of_mut (or another exposed
  // mutable pointer) and the target is still alive
  pub fn as_mut_ptr<T>(self) -> *mut T {
    ptr::with_exposed_provenance_mut(self.0)
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:#x}", self.0)
  }
}

// Smallest multiple of 'alignment' which is not less than 'value'
//
// 'alignment' must be non zero but does not need to be a power
// of two
pub const fn align_up(value: usize, alignment: usize) -> usize {
  match value % alignment {
    0 => value,
    rem => value.wrapping_add(alignment - rem)
  }
}

// Offset (or address) of a field with 'alignment' which follows
// 'size' bytes that start at 'start'
pub const fn field_offset(start: usize, size: usize, alignment: usize) -> usize {
  align_up(start.wrapping_add(size), alignment)
}

pub const fn alignment_of<T>() -> NonZeroUsize {
  match NonZeroUsize::new(mem::align_of::<T>()) {
    Some(alignment) => alignment,
    // Alignment of a type is at least one
    None => unreachable!()
  }
}
