pub mod clock;
pub mod controller;
pub mod html;
pub mod item;
pub mod store;
pub mod theme;
pub mod view;

pub use clock::{
  Clock,
  FixedClock,
  SystemClock
};
pub use controller::{
  Change,
  Controller,
  Event,
  NoOp,
  PendingEdit,
  TASKS_STORAGE_KEY
};
pub use item::{
  Item,
  ItemId
};
pub use store::{
  KeyValueStore,
  MemoryStore
};
pub use theme::{
  AmbientPreference,
  NoAmbientPreference,
  THEME_STORAGE_KEY,
  Theme
};
pub use view::{
  ListView,
  RowView,
  Summary
};
