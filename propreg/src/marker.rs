use std::{cell::Cell, fmt, mem, num::NonZeroUsize};

use crate::{address::{alignment_of, Address}, descriptor::PropertyDescriptor, inspector::{TypeInspector, ValueInspector}, registry::Registry};

#[derive(Clone, Copy)]
struct Registration {
  registry: &'static Registry,
  address: Address
}

// NOTE: This type is considered to be part of public API
//
// Placed right before the field it describes. While registered
// the registry holds exactly one descriptor keyed by the address
// the marker had at registration, dropping the marker removes it
//
// Markers inside an Inspected are never registered themselves,
// the Inspected owns those registrations instead
pub struct PropertyMarker {
  registration: Cell<Option<Registration>>
}

impl PropertyMarker {
  #[must_use]
  pub const fn new() -> Self {
    Self {
      registration: Cell::new(None)
    }
  }

  pub fn address(&self) -> Address {
    Address::of(self)
  }

  pub fn is_registered(&self) -> bool {
    self.registration.get().is_some()
  }

  // SAFETY: Caller must ensure the marker won't move until it is
  // released or dropped, and that a live value of the type
  // 'inspector' is bound to is placed at the first address after
  // the marker aligned to 'alignment' for that whole time
  pub unsafe fn register(&self, registry: &'static Registry, alignment: NonZeroUsize, name: &'static str, description: &'static str, inspector: Box<dyn TypeInspector>) {
    let address = self.address();
    assert!(!self.is_registered(), "Marker at {address} is already registered");

    registry.create_property(PropertyDescriptor::new(address, mem::size_of::<Self>(), alignment, name, description, inspector));
    self.registration.set(Some(Registration {
      registry,
      address
    }));
  }

  // Registers the field of type T following this marker
  //
  // SAFETY: Same as 'register'
  pub unsafe fn register_for<T>(&self, registry: &'static Registry, name: &'static str, description: &'static str)
  where
    T: fmt::Display + std::str::FromStr + 'static,
    T::Err: fmt::Display
  {
    // SAFETY: Forwarded caller contract
    unsafe { self.register(registry, alignment_of::<T>(), name, description, ValueInspector::<T>::boxed()) };
  }

  // Removes the descriptor if registered, further calls are no-op
  pub fn release(&self) {
    if let Some(Registration { registry, address }) = self.registration.take() {
      registry.remove_property(address);
    }
  }
}

impl Default for PropertyMarker {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for PropertyMarker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PropertyMarker")
      .field("registered_at", &self.registration.get().map(|registration| registration.address))
      .finish()
  }
}

impl Drop for PropertyMarker {
  fn drop(&mut self) {
    self.release();
  }
}
