#![deny(unsafe_op_in_unsafe_fn)]

use log::info;
use propreg::{Inspectable, Inspected, PropertyInfo, Registry, StdConsole};
use tabled::{settings::Style, Table, Tabled};

use objects::{Model, Sprite};

mod objects;

#[cfg(not(miri))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Tabled)]
struct PropertyRow {
  #[tabled(rename = "Name")]
  name: &'static str,
  #[tabled(rename = "Description")]
  description: &'static str,
  #[tabled(rename = "Type")]
  type_name: &'static str,
  #[tabled(rename = "Marker")]
  marker: String,
  #[tabled(rename = "Field")]
  field: String
}

impl From<PropertyInfo> for PropertyRow {
  fn from(info: PropertyInfo) -> Self {
    Self {
      name: info.name,
      description: info.description,
      type_name: info.type_name,
      marker: info.marker.to_string(),
      field: info.field.to_string()
    }
  }
}

fn print_properties<T: Inspectable>(label: &str, object: &Inspected<T>) {
  let rows = object.properties().into_iter().map(PropertyRow::from);
  println!("{label} at {}", object.base());
  println!("{}", Table::new(rows).with(Style::rounded()));
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    .format_timestamp_millis()
    .init();

  let player_sprite = Inspected::new(Sprite::default());
  let mut enemy_sprite = Inspected::new(Sprite::default());
  let player_model = Inspected::new(Model::default());
  info!("Registry holds {} properties", Registry::global().len());

  print_properties("Enemy sprite", &enemy_sprite);

  let mut console = StdConsole::stdio();
  let selection = enemy_sprite.select(&mut console);
  for failure in &selection.failures {
    eprintln!("Property {:?} at {} was not changed: {}", failure.name, failure.marker, failure.error);
  }

  info!(
    "Enemy sprite is now at ({}, {}) scaled ({}, {}) with texture {:?}",
    enemy_sprite.x, enemy_sprite.y, enemy_sprite.x_scale, enemy_sprite.y_scale, enemy_sprite.texture_id
  );
  info!("Player sprite at ({}, {}), player model {:?}", player_sprite.x, player_sprite.y, player_model.model_id);

  drop(player_model);
  drop(enemy_sprite);
  drop(player_sprite);
  info!("Registry stats at exit: {:?}", Registry::global().stats());
}
