use std::{fmt, mem, ops::{Deref, DerefMut}};

use crate::{address::Address, console::Console, descriptor::{Inspectable, PropertyDescriptor, PropertyInfo}, marker::PropertyMarker, registry::{Registry, Selection}};

// NOTE: This type is considered to be part of public API
//
// Owns a T at a fixed heap address and keeps every property
// of it registered for as long as it lives. Properties are
// registered in declaration order once T reached its final
// address and removed in reverse order on drop
//
// Registrations belong to this owner and are keyed by the heap
// slot, the markers inside T stay unregistered. Assigning,
// replacing or swapping the whole T through DerefMut therefore
// never touches the registry, and a T moved out can be wrapped
// into another Inspected
pub struct Inspected<T: Inspectable> {
  inner: Box<T>,
  registry: &'static Registry
}

impl<T: Inspectable> Inspected<T> {
  pub fn new(value: T) -> Self {
    Self::new_in(value, Registry::global())
  }

  pub fn new_in(value: T, registry: &'static Registry) -> Self {
    let this = Self {
      inner: Box::new(value),
      registry
    };

    // T is on the heap and the slot outlives every registration,
    // Drop removes them before the box is freed. Inspectable
    // contract guarantees the field after marker matches the
    // inspector whatever T value currently occupies the slot
    let base = this.base();
    for layout in T::PROPERTIES {
      registry.create_property(PropertyDescriptor::new(
        base.offset(layout.marker_offset),
        mem::size_of::<PropertyMarker>(),
        layout.alignment,
        layout.name,
        layout.description,
        (layout.inspector)()
      ));
    }

    this
  }

  pub fn base(&self) -> Address {
    Address::of::<T>(&self.inner)
  }

  pub fn registry(&self) -> &'static Registry {
    self.registry
  }

  pub fn properties(&self) -> Vec<PropertyInfo> {
    self.registry.properties_in(self.base(), mem::size_of::<T>())
  }

  // Shows then edits every property of this object in
  // declaration order
  pub fn select(&mut self, console: &mut dyn Console) -> Selection {
    let base = Address::of_mut::<T>(&mut self.inner);

    // SAFETY: Every marker within T's extent was registered with
    // an inspector matching the field after it (Inspectable or
    // PropertyMarker::register contracts) and T is exclusively
    // borrowed so nothing else touches the fields during the scan
    unsafe { self.registry.select_object(base, mem::size_of::<T>(), console) }
  }
}

impl<T: Inspectable> Deref for Inspected<T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.inner
  }
}

impl<T: Inspectable> DerefMut for Inspected<T> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.inner
  }
}

impl<T: Inspectable> Drop for Inspected<T> {
  fn drop(&mut self) {
    let base = self.base();
    for layout in T::PROPERTIES.iter().rev() {
      self.registry.remove_property(base.offset(layout.marker_offset));
    }
  }
}

impl<T: Inspectable + fmt::Debug> fmt::Debug for Inspected<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Inspected")
      .field("base", &self.base())
      .field("inner", &self.inner)
      .finish()
  }
}
