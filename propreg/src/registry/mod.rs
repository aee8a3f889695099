use std::{cell::Cell, ptr, sync::LazyLock};

use log::{debug, trace, warn};
use parking_lot::{Mutex, MutexGuard};

use crate::{address::Address, console::Console, descriptor::{PropertyDescriptor, PropertyInfo}, error::InspectError};

pub use bounds::{Closed, HalfOpen, RangeBound};
pub use journal::RegistryEvent;
use journal::Journal;

mod bounds;
mod journal;

// NOTE: This is considered public API
// therefore be careful with breaking changes
#[derive(Clone, Debug)]
pub struct Params {
  // How many create/remove events to remember, zero disables
  // the journal
  pub journal_capacity: usize
}

impl Default for Params {
  fn default() -> Self {
    Self {
      journal_capacity: 256
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
  pub live: usize,
  pub created: u64,
  pub removed: u64
}

#[derive(Debug)]
pub struct PropertyFailure {
  pub name: &'static str,
  pub marker: Address,
  pub error: InspectError
}

// Outcome of one scan, failures are per property and
// never stop the scan
#[derive(Debug, Default)]
pub struct Selection {
  pub matched: usize,
  pub failures: Vec<PropertyFailure>
}

impl Selection {
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }
}

// Insertion ordered list of descriptors. Not synchronized,
// see Registry for the shared one
pub struct PropertyRegistry {
  properties: Vec<PropertyDescriptor>,
  journal: Journal,
  created: u64,
  removed: u64
}

impl PropertyRegistry {
  pub fn new(params: &Params) -> Self {
    Self {
      properties: Vec::new(),
      journal: Journal::new(params.journal_capacity),
      created: 0,
      removed: 0
    }
  }

  pub fn create_property(&mut self, descriptor: PropertyDescriptor) {
    debug!("Registering property {:?} at {} (size {}, alignment {})", descriptor.name, descriptor.marker, descriptor.size, descriptor.alignment);

    self.journal.record(RegistryEvent::Created {
      marker: descriptor.marker,
      name: descriptor.name
    });
    self.created += 1;
    self.properties.push(descriptor);
  }

  // Removes every descriptor registered at 'marker', which
  // is at most one while markers are used correctly
  pub fn remove_property(&mut self, marker: Address) {
    let journal = &mut self.journal;
    let removed = &mut self.removed;

    self.properties.retain(|property| {
      if property.marker != marker {
        return true;
      }

      debug!("Removing property {:?} at {}", property.name, marker);
      journal.record(RegistryEvent::Removed {
        marker,
        name: property.name
      });
      *removed += 1;
      false
    });
  }

  pub fn matching<B: RangeBound>(&self, base: Address, extent: usize) -> impl Iterator<Item = &PropertyDescriptor> {
    self.properties.iter().filter(move |property| B::contains(base, extent, property.marker))
  }

  pub fn properties_in(&self, base: Address, extent: usize) -> Vec<PropertyInfo> {
    self.matching::<HalfOpen>(base, extent).map(PropertyDescriptor::info).collect()
  }

  // Shows then edits every property whose marker lies in
  // [base, base + extent), in registration order
  //
  // SAFETY: Caller must ensure that for every descriptor in range
  // its inspector may be invoked at the computed field address,
  // meaning for ordinary inspectors the field is alive and not
  // accessed by anything else for the whole call
  pub unsafe fn select_object(&self, base: Address, extent: usize, console: &mut dyn Console) -> Selection {
    // SAFETY: Forwarded caller contract
    unsafe { self.select_object_with::<HalfOpen>(base, extent, console) }
  }

  // SAFETY: Same as 'select_object'
  pub unsafe fn select_object_with<B: RangeBound>(&self, base: Address, extent: usize, console: &mut dyn Console) -> Selection {
    let mut selection = Selection::default();

    for property in self.matching::<B>(base, extent) {
      trace!("Selected property {:?} at {}", property.name, property.marker);
      selection.matched += 1;

      // SAFETY: Forwarded caller contract
      if let Err(error) = unsafe { Self::inspect(property, console) } {
        warn!("Inspecting property {:?} at {} failed: {error}", property.name, property.marker);
        selection.failures.push(PropertyFailure {
          name: property.name,
          marker: property.marker,
          error
        });
      }
    }

    selection
  }

  // SAFETY: Caller must ensure inspector can be invoked
  // on property's field address
  unsafe fn inspect(property: &PropertyDescriptor, console: &mut dyn Console) -> Result<(), InspectError> {
    console.write_text(&format!("\n{} ({})\n", property.name, property.description))?;

    let field = property.field_address();
    // SAFETY: Caller ensured the field is valid for the inspector,
    // show always comes first so old value is seen before editing
    unsafe {
      property.inspector.show(field, console)?;
      property.inspector.edit(field, console)
    }
  }

  pub fn len(&self) -> usize {
    self.properties.len()
  }

  pub fn is_empty(&self) -> bool {
    self.properties.is_empty()
  }

  pub fn stats(&self) -> Stats {
    Stats {
      live: self.properties.len(),
      created: self.created,
      removed: self.removed
    }
  }

  pub fn take_journal_snapshot(&self, buffer: &mut Vec<RegistryEvent>) {
    self.journal.snapshot(buffer);
  }
}

// Process wide registry, markers register into it
//
// The lock is held for the whole of a selection, including
// every inspector and console call made during it
pub struct Registry {
  inner: Mutex<PropertyRegistry>
}

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::new(Params::default()));

thread_local! {
  // Address of the registry this thread is selecting on,
  // zero while not selecting
  static SELECTING: Cell<usize> = const { Cell::new(0) };
}

// Marks the current thread as selecting on a registry until
// dropped, restores the previous one for nested selections on
// other registries
struct SelectingGuard {
  previous: usize
}

impl SelectingGuard {
  fn enter(registry: &Registry) -> Self {
    Self {
      previous: SELECTING.replace(ptr::from_ref(registry).addr())
    }
  }
}

impl Drop for SelectingGuard {
  fn drop(&mut self) {
    SELECTING.set(self.previous);
  }
}

impl Registry {
  pub fn new(params: Params) -> Self {
    Self {
      inner: Mutex::new(PropertyRegistry::new(&params))
    }
  }

  // Empty until first marker registers, drained again
  // as registered objects die
  pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
  }

  // Markers need a registry which outlives them
  pub fn leak(self) -> &'static Registry {
    Box::leak(Box::new(self))
  }

  // Panics instead of deadlocking when an inspector or console
  // calls back into the registry it is being driven by
  fn lock(&self) -> MutexGuard<'_, PropertyRegistry> {
    assert!(
      SELECTING.get() != ptr::from_ref(self).addr(),
      "Registry was re-entered from an inspector or console during selection"
    );
    self.inner.lock()
  }

  pub fn create_property(&self, descriptor: PropertyDescriptor) {
    self.lock().create_property(descriptor);
  }

  pub fn remove_property(&self, marker: Address) {
    let mut inner = self.lock();
    let before = inner.len();
    inner.remove_property(marker);

    if inner.len() == before {
      trace!("No property registered at {marker}, nothing to remove");
    }
  }

  // SAFETY: Same as PropertyRegistry::select_object
  pub unsafe fn select_object(&self, base: Address, extent: usize, console: &mut dyn Console) -> Selection {
    // SAFETY: Forwarded caller contract
    unsafe { self.select_object_with::<HalfOpen>(base, extent, console) }
  }

  // SAFETY: Same as PropertyRegistry::select_object
  pub unsafe fn select_object_with<B: RangeBound>(&self, base: Address, extent: usize, console: &mut dyn Console) -> Selection {
    let inner = self.lock();
    let _selecting = SelectingGuard::enter(self);

    // SAFETY: Forwarded caller contract
    unsafe { inner.select_object_with::<B>(base, extent, console) }
  }

  pub fn properties_in(&self, base: Address, extent: usize) -> Vec<PropertyInfo> {
    self.lock().properties_in(base, extent)
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  pub fn stats(&self) -> Stats {
    self.lock().stats()
  }

  pub fn journal(&self) -> Vec<RegistryEvent> {
    let mut events = Vec::new();
    self.lock().take_journal_snapshot(&mut events);
    events
  }
}
