use std::collections::BTreeSet;
use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

/// Millisecond-derived identifier of
/// a single item.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::str::FromStr for ItemId {
  type Err = std::num::ParseIntError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    s.trim().parse::<i64>().map(ItemId)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct Item {
  pub id:         ItemId,
  pub text:       String,
  #[serde(default)]
  pub completed:  bool,
  #[serde(default)]
  pub created_at: String
}

impl Item {
  pub fn new(
    id: ItemId,
    text: String,
    created_at: String
  ) -> Self {
    Self {
      id,
      text,
      completed: false,
      created_at
    }
  }
}

/// Trims raw user input, returning
/// `None` when nothing is left.
pub fn normalize_text(
  raw: &str
) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}

/// Picks an id for a new item. The
/// clock reading is used unless some
/// item already holds it; then one past
/// the largest id, or, when that would
/// overflow, the nearest free id below
/// the clock reading.
pub fn next_id(
  items: &[Item],
  now_millis: i64
) -> ItemId {
  let taken: BTreeSet<i64> =
    items.iter().map(|item| item.id.0).collect();
  if !taken.contains(&now_millis) {
    return ItemId(now_millis);
  }

  if let Some(next) = taken
    .last()
    .and_then(|max| max.checked_add(1))
  {
    return ItemId(next);
  }

  let mut candidate = now_millis;
  while taken.contains(&candidate) {
    candidate = candidate.wrapping_sub(1);
  }
  ItemId(candidate)
}

/// Parses the persisted `tasks` value.
///
/// Anything that is not a JSON array of
/// items yields an empty collection.
/// Later duplicates of an id are
/// dropped.
pub fn decode_items(
  raw: Option<&str>
) -> Vec<Item> {
  let Some(raw) = raw else {
    return Vec::new();
  };

  let parsed = match serde_json::from_str::<
    Option<Vec<Item>>
  >(raw)
  {
    | Ok(parsed) => {
      parsed.unwrap_or_default()
    }
    | Err(error) => {
      tracing::warn!(
        %error,
        "malformed persisted tasks; \
         starting with an empty list"
      );
      return Vec::new();
    }
  };

  let mut seen = BTreeSet::new();
  let mut out =
    Vec::with_capacity(parsed.len());
  for item in parsed {
    if !seen.insert(item.id) {
      tracing::warn!(
        id = %item.id,
        "dropping item with duplicate id"
      );
      continue;
    }
    out.push(item);
  }
  out
}

pub fn encode_items(
  items: &[Item]
) -> anyhow::Result<String> {
  Ok(serde_json::to_string(items)?)
}
