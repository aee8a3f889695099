// NOTE: Everything in this file is considered to be part of public API

use std::{fmt, num::NonZeroUsize};

use crate::{address::Address, inspector::TypeInspector};

// Registry record for one live marker
pub struct PropertyDescriptor {
  // Identity of the marker, also the key for removal
  pub marker: Address,

  // Size and alignment used to step from the marker to the
  // field, size is of the marker and alignment is of the field
  pub size: usize,
  pub alignment: NonZeroUsize,

  pub name: &'static str,
  pub description: &'static str,
  pub inspector: Box<dyn TypeInspector>
}

impl PropertyDescriptor {
  pub fn new(marker: Address, size: usize, alignment: NonZeroUsize, name: &'static str, description: &'static str, inspector: Box<dyn TypeInspector>) -> Self {
    Self {
      marker,
      size,
      alignment,
      name,
      description,
      inspector
    }
  }

  pub fn field_address(&self) -> Address {
    self.marker.field_after(self.size, self.alignment)
  }

  pub fn info(&self) -> PropertyInfo {
    PropertyInfo {
      name: self.name,
      description: self.description,
      type_name: self.inspector.type_name(),
      marker: self.marker,
      field: self.field_address()
    }
  }
}

impl fmt::Debug for PropertyDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PropertyDescriptor")
      .field("marker", &self.marker)
      .field("size", &self.size)
      .field("alignment", &self.alignment)
      .field("name", &self.name)
      .field("description", &self.description)
      .field("type_name", &self.inspector.type_name())
      .finish()
  }
}

// Plain copy of what a descriptor says, for listings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
  pub name: &'static str,
  pub description: &'static str,
  pub type_name: &'static str,
  pub marker: Address,
  pub field: Address
}

// Where one property lives inside its owner, computed once
// per owner type
pub struct PropertyLayout {
  pub marker_offset: usize,
  pub field_offset: usize,
  pub alignment: NonZeroUsize,
  pub name: &'static str,
  pub description: &'static str,
  pub inspector: fn() -> Box<dyn TypeInspector>
}

/// Types whose properties can be registered by
/// [`Inspected`](crate::Inspected)
///
/// # Safety
///
/// Unsafe because implementer has to give correct
/// layout for a type. Every entry must name the offset
/// of a `PropertyMarker` field of `Self` and the offset
/// of the field right after it, and the inspector must be
/// bound to exactly that field's type, as the registry
/// reads and writes the field through the inspector
/// with nothing else to go on. Use the `property!` macro
/// which checks all of that at compile time.
pub unsafe trait Inspectable: Sized {
  // In declaration order
  const PROPERTIES: &'static [PropertyLayout];
}

// Builds a PropertyLayout for 'field' of 'owner' which is
// preceded by 'marker'. Fails to compile if the field isn't
// laid out right after the marker or if the type given
// doesn't match the field
#[macro_export]
macro_rules! property {
  ($owner:ty, $marker:ident => $field:ident : $field_ty:ty, $name:expr, $description:expr) => {
    $crate::property!($owner, $marker => $field: $field_ty, $name, $description, inspector = $crate::ValueInspector::<$field_ty>::boxed)
  };

  ($owner:ty, $marker:ident => $field:ident : $field_ty:ty, $name:expr, $description:expr, inspector = $inspector:expr) => {{
    #[allow(dead_code)]
    fn __field_type_check(owner: &$owner) -> (&$crate::PropertyMarker, &$field_ty) {
      (&owner.$marker, &owner.$field)
    }

    const _: () = assert!(
      ::core::mem::offset_of!($owner, $field) == $crate::field_offset(
        ::core::mem::offset_of!($owner, $marker),
        ::core::mem::size_of::<$crate::PropertyMarker>(),
        ::core::mem::align_of::<$field_ty>()
      ),
      "Property field must be placed directly after its marker"
    );

    $crate::PropertyLayout {
      marker_offset: ::core::mem::offset_of!($owner, $marker),
      field_offset: ::core::mem::offset_of!($owner, $field),
      alignment: $crate::alignment_of::<$field_ty>(),
      name: $name,
      description: $description,
      inspector: $inspector
    }
  }};
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{inspector::ValueInspector, PropertyMarker};

  #[allow(dead_code)]
  #[repr(C)]
  struct Sample {
    byte: u8,
    flag_marker: PropertyMarker,
    flag: u8,
    wide_marker: PropertyMarker,
    wide: u64
  }

  #[test]
  fn layout_matches_field_offsets() {
    let layout = property!(Sample, wide_marker => wide: u64, "Wide", "A wide field");
    assert_eq!(layout.marker_offset, std::mem::offset_of!(Sample, wide_marker));
    assert_eq!(layout.field_offset, std::mem::offset_of!(Sample, wide));
    assert_eq!(layout.alignment.get(), 8);
    assert_eq!((layout.inspector)().type_name(), "u64");

    let flag = property!(Sample, flag_marker => flag: u8, "Flag", "");
    assert_eq!(flag.alignment.get(), 1);
    assert_eq!(flag.field_offset, flag.marker_offset + std::mem::size_of::<PropertyMarker>());
  }

  #[test]
  fn descriptor_computes_field_address() {
    let four = NonZeroUsize::new(4).unwrap();
    let descriptor = PropertyDescriptor::new(Address(0x1000), 1, four, "X", "", ValueInspector::<i32>::boxed());
    assert_eq!(descriptor.field_address(), Address(0x1004));

    let info = descriptor.info();
    assert_eq!(info.marker, Address(0x1000));
    assert_eq!(info.field, Address(0x1004));
    assert_eq!(info.type_name, "i32");
  }

  #[test]
  fn descriptor_near_end_of_address_space() {
    let eight = NonZeroUsize::new(8).unwrap();
    let descriptor = PropertyDescriptor::new(Address(usize::MAX - 3), 1, eight, "X", "", ValueInspector::<u64>::boxed());
    assert_eq!(descriptor.field_address(), Address(0));
  }
}
