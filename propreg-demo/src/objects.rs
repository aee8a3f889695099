// Sample objects carrying inspectable properties

use propreg::{property, Inspectable, PropertyLayout, PropertyMarker};

#[repr(C)]
pub struct Model {
  model_id_marker: PropertyMarker,
  pub model_id: String
}

unsafe impl Inspectable for Model {
  const PROPERTIES: &'static [PropertyLayout] = &[
    property!(Model, model_id_marker => model_id: String, "Model Id", "")
  ];
}

impl Default for Model {
  fn default() -> Self {
    Self {
      model_id_marker: PropertyMarker::new(),
      model_id: String::new()
    }
  }
}

#[repr(C)]
pub struct Sprite {
  x_marker: PropertyMarker,
  pub x: i32,

  y_marker: PropertyMarker,
  pub y: i32,

  x_scale_marker: PropertyMarker,
  pub x_scale: f32,

  y_scale_marker: PropertyMarker,
  pub y_scale: f32,

  texture_id_marker: PropertyMarker,
  pub texture_id: String
}

unsafe impl Inspectable for Sprite {
  const PROPERTIES: &'static [PropertyLayout] = &[
    property!(Sprite, x_marker => x: i32, "X", "Sprite X axis position"),
    property!(Sprite, y_marker => y: i32, "Y", "Sprite Y axis position"),
    property!(Sprite, x_scale_marker => x_scale: f32, "Scale X", "Sprite X axis scale"),
    property!(Sprite, y_scale_marker => y_scale: f32, "Scale Y", "Sprite Y axis scale"),
    property!(Sprite, texture_id_marker => texture_id: String, "Texture Id", "Sprite texture Id")
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
      y_scale_marker: PropertyMarker::new(),
      y_scale: 1.0,
      texture_id_marker: PropertyMarker::new(),
      texture_id: "DebugTexture.png".to_owned()
    }
  }
}
