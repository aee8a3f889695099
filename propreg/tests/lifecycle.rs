use std::{io::Cursor, mem};

use propreg::{property, registry::{Params, RegistryEvent}, Address, Inspectable, Inspected, PropertyLayout, PropertyMarker, Registry, StreamConsole};

#[repr(C)]
struct Sprite {
  x_marker: PropertyMarker,
  x: i32,
  y_marker: PropertyMarker,
  y: i32,
  x_scale_marker: PropertyMarker,
  x_scale: f32,
  texture_marker: PropertyMarker,
  texture_id: String
}

unsafe impl Inspectable for Sprite {
  const PROPERTIES: &'static [PropertyLayout] = &[
    property!(Sprite, x_marker => x: i32, "X", "Sprite X axis position"),
    property!(Sprite, y_marker => y: i32, "Y", "Sprite Y axis position"),
    property!(Sprite, x_scale_marker => x_scale: f32, "Scale X", "Sprite X axis scale"),
    property!(Sprite, texture_marker => texture_id: String, "Texture Id", "Sprite texture Id")
  ];
}

impl Default for Sprite {
  fn default() -> Self {
    Self {
      x_marker: PropertyMarker::new(),
      x: 0,
      y_marker: PropertyMarker::new(),
      y: 0,
      x_scale_marker: PropertyMarker::new(),
      x_scale: 1.0,
      texture_marker: PropertyMarker::new(),
      texture_id: "DebugTexture.png".to_owned()
    }
  }
}

fn private_registry() -> &'static Registry {
  Registry::new(Params::default()).leak()
}

fn run(sprite: &mut Inspected<Sprite>, input: &str) -> (propreg::Selection, String) {
  let mut console = StreamConsole::new(Cursor::new(input.to_owned()), Vec::new());
  let selection = sprite.select(&mut console);
  let (_, output) = console.into_parts();
  (selection, String::from_utf8(output).unwrap())
}

#[test]
fn full_session_transcript() {
  let mut sprite = Inspected::new_in(Sprite::default(), private_registry());
  let (selection, output) = run(&mut sprite, "4\n-2\n0.5\nHero.png\n");

  assert_eq!(selection.matched, 4);
  assert!(selection.is_clean());
  assert_eq!(output, concat!(
    "\nX (Sprite X axis position)\n\nProperty value: 0\nEnter new value: ",
    "\nY (Sprite Y axis position)\n\nProperty value: 0\nEnter new value: ",
    "\nScale X (Sprite X axis scale)\n\nProperty value: 1\nEnter new value: ",
    "\nTexture Id (Sprite texture Id)\n\nProperty value: DebugTexture.png\nEnter new value: "
  ));
  assert_eq!((sprite.x, sprite.y, sprite.x_scale), (4, -2, 0.5));
  assert_eq!(sprite.texture_id, "Hero.png");
}

#[test]
fn edited_values_show_back() {
  let mut sprite = Inspected::new_in(Sprite::default(), private_registry());
  run(&mut sprite, "7 8 2.25 Enemy.png");

  let (_, output) = run(&mut sprite, "7 8 2.25 Enemy.png");
  assert!(output.contains("Property value: 7\n"));
  assert!(output.contains("Property value: 8\n"));
  assert!(output.contains("Property value: 2.25\n"));
  assert!(output.contains("Property value: Enemy.png\n"));
}

#[test]
fn selecting_one_object_leaves_neighbours_alone() {
  let registry = private_registry();
  let mut player = Inspected::new_in(Sprite::default(), registry);
  let enemy = Inspected::new_in(Sprite::default(), registry);

  run(&mut player, "1 2 3 Player.png");
  assert_eq!(player.x, 1);
  assert_eq!(enemy.x, 0);
  assert_eq!(enemy.texture_id, "DebugTexture.png");
  assert_eq!(registry.len(), 8);
}

#[test]
fn bad_input_is_reported_per_property() {
  let mut sprite = Inspected::new_in(Sprite::default(), private_registry());
  let (selection, _) = run(&mut sprite, "nope 5 wide Ok.png");

  assert_eq!(selection.matched, 4);
  let failed: Vec<_> = selection.failures.iter().map(|failure| failure.name).collect();
  assert_eq!(failed, ["X", "Scale X"]);
  assert!(selection.failures.iter().all(|failure| failure.error.is_parse()));
  assert_eq!((sprite.x, sprite.y, sprite.x_scale), (0, 5, 1.0));
  assert_eq!(sprite.texture_id, "Ok.png");
}

#[test]
fn destroyed_object_is_no_longer_discoverable() {
  let registry = private_registry();
  let sprite = Inspected::new_in(Sprite::default(), registry);
  let base = sprite.base();
  drop(sprite);

  assert!(registry.is_empty());
  assert!(registry.properties_in(base, mem::size_of::<Sprite>()).is_empty());

  let removed: Vec<_> = registry.journal()
    .into_iter()
    .filter_map(|event| match event {
      RegistryEvent::Removed { name, .. } => Some(name),
      RegistryEvent::Created { .. } => None
    })
    .collect();
  assert_eq!(removed, ["Texture Id", "Scale X", "Y", "X"]);
}

#[test]
fn markers_precede_their_fields() {
  let sprite = Inspected::new_in(Sprite::default(), private_registry());
  for info in sprite.properties() {
    assert!(info.field > info.marker);
    assert_eq!(info.field.get() - info.marker.get(), mem::size_of::<PropertyMarker>());
  }
  assert_eq!(sprite.properties()[3].field, Address::of(&sprite.texture_id));
}

#[test]
fn global_registry_tracks_objects() {
  let sprite = Inspected::new(Sprite::default());
  assert_eq!(sprite.properties().len(), 4);
  assert!(std::ptr::eq(sprite.registry(), Registry::global()));
}

#[test]
fn reassigned_sprite_remains_editable() {
  let registry = private_registry();
  let mut sprite = Inspected::new_in(Sprite::default(), registry);
  *sprite = Sprite { x: 40, ..Sprite::default() };

  let (selection, output) = run(&mut sprite, "1 2 3 New.png");
  assert_eq!(selection.matched, 4);
  assert!(output.contains("Property value: 40\n"));
  assert_eq!(sprite.texture_id, "New.png");
  assert_eq!(registry.stats().removed, 0);
}

#[test]
fn sprite_moved_between_owners() {
  let registry = private_registry();
  let mut first = Inspected::new_in(Sprite::default(), registry);
  let taken = mem::take(&mut *first);
  let mut second = Inspected::new_in(taken, registry);
  assert_eq!(registry.len(), 8);

  run(&mut second, "5 6 7 Moved.png");
  assert_eq!(second.texture_id, "Moved.png");
  assert_eq!(run(&mut first, "0 0 1 Other.png").0.matched, 4);

  drop(second);
  assert_eq!(registry.len(), 4);
  assert_eq!(first.texture_id, "Other.png");
}
