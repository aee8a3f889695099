use std::{any, fmt::Display, marker::PhantomData, str::FromStr};

use crate::{address::Address, console::Console, error::InspectError};

// NOTE: This type is considered to be part of public API
//
// Type erased show/edit of one concrete type. The concrete
// type is fixed when the inspector is created, callers
// only ever hand it an address
//
// show and edit run with the owning Registry locked. They must
// not call back into that registry (registering, removing,
// listing or selecting), doing so panics as it would deadlock
pub trait TypeInspector: Send {
  fn type_name(&self) -> &'static str;

  // Render the value at 'field' to the console
  //
  // SAFETY: Caller must ensure 'field' points to a live, properly
  // aligned value of the type this inspector is bound to
  unsafe fn show(&self, field: Address, console: &mut dyn Console) -> Result<(), InspectError>;

  // Read one value from the console and overwrite the value at
  // 'field' with it. The value is left untouched on error
  //
  // SAFETY: Same as 'show' and additionally nothing else may
  // access the value for the duration of the call
  unsafe fn edit(&self, field: Address, console: &mut dyn Console) -> Result<(), InspectError>;
}

// Inspector for anything which can be printed and parsed
// back from a single token
pub struct ValueInspector<T> {
  _phantom: PhantomData<fn() -> T>
}

impl<T> ValueInspector<T>
where
  T: Display + FromStr + 'static,
  T::Err: Display
{
  pub fn new() -> Self {
    Self {
      _phantom: PhantomData {}
    }
  }

  // Usable as a plain fn pointer in layout tables
  pub fn boxed() -> Box<dyn TypeInspector> {
    Box::new(Self::new())
  }
}

impl<T> Default for ValueInspector<T>
where
  T: Display + FromStr + 'static,
  T::Err: Display
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T> TypeInspector for ValueInspector<T>
where
  T: Display + FromStr + 'static,
  T::Err: Display
{
  fn type_name(&self) -> &'static str {
    any::type_name::<T>()
  }

  unsafe fn show(&self, field: Address, console: &mut dyn Console) -> Result<(), InspectError> {
    // SAFETY: Caller ensured 'field' points to live T
    let value = unsafe { &*field.as_mut_ptr::<T>().cast_const() };
    console.write_text(&format!("\nProperty value: {value}\n"))
  }

  unsafe fn edit(&self, field: Address, console: &mut dyn Console) -> Result<(), InspectError> {
    console.write_text("Enter new value: ")?;
    let input = console.read_token()?;

    // Parse fully before touching the field so a bad
    // input never leaves a half written value behind
    let value = input.parse::<T>().map_err(|err| InspectError::Parse {
      reason: err.to_string(),
      type_name: any::type_name::<T>(),
      input
    })?;

    // SAFETY: Caller ensured 'field' points to live T which
    // nothing else accesses during this call, assignment drops
    // the old value properly
    unsafe { *field.as_mut_ptr::<T>() = value };
    Ok(())
  }
}
