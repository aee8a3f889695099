// Bounded record of what happened to the registry, oldest
// events fall off once capacity is reached

use bounded_vec_deque::BoundedVecDeque;

use crate::address::Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
  Created {
    marker: Address,
    name: &'static str
  },
  Removed {
    marker: Address,
    name: &'static str
  }
}

impl RegistryEvent {
  pub fn marker(&self) -> Address {
    match *self {
      Self::Created { marker, .. } | Self::Removed { marker, .. } => marker
    }
  }

  pub fn name(&self) -> &'static str {
    match *self {
      Self::Created { name, .. } | Self::Removed { name, .. } => name
    }
  }
}

pub(super) struct Journal {
  // None if journal is disabled
  window: Option<BoundedVecDeque<RegistryEvent>>
}

impl Journal {
  pub fn new(capacity: usize) -> Self {
    Self {
      window: (capacity > 0).then(|| BoundedVecDeque::new(capacity))
    }
  }

  pub fn record(&mut self, event: RegistryEvent) {
    if let Some(window) = self.window.as_mut() {
      window.push_back(event);
    }
  }

  pub fn snapshot(&self, buffer: &mut Vec<RegistryEvent>) {
    if let Some(window) = self.window.as_ref() {
      buffer.extend(window.iter().copied());
    }
  }
}
