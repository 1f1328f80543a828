use std::fmt;

use crate::item::{
  Item,
  ItemId
};
use crate::theme::Theme;

pub const EMPTY_STATE_TEXT: &str =
  "No tasks yet. Add one above!";

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct Summary {
  pub pending:   usize,
  pub completed: usize
}

impl Summary {
  pub fn of(items: &[Item]) -> Self {
    let completed = items
      .iter()
      .filter(|item| item.completed)
      .count();
    Self {
      pending: items.len() - completed,
      completed
    }
  }

  pub fn total(&self) -> usize {
    self.pending + self.completed
  }
}

impl fmt::Display for Summary {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{} pending, {} completed",
      self.pending, self.completed
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
  pub id:         ItemId,
  pub text:       String,
  pub completed:  bool,
  pub created_at: String,
  pub editing:    bool
}

/// Everything a host needs to draw the
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
  pub dark:    bool,
  pub rows:    Vec<RowView>,
  pub summary: Option<Summary>
}

impl ListView {
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Text for the count region; blank
  /// while the list is empty.
  pub fn status_text(&self) -> String {
    self
      .summary
      .map(|summary| summary.to_string())
      .unwrap_or_default()
  }

  pub fn has_completed(&self) -> bool {
    self
      .summary
      .is_some_and(|summary| summary.completed > 0)
  }
}

pub fn project(
  items: &[Item],
  theme: Theme,
  editing: Option<ItemId>
) -> ListView {
  let rows = items
    .iter()
    .map(|item| RowView {
      id:         item.id,
      text:       item.text.clone(),
      completed:  item.completed,
      created_at: item.created_at.clone(),
      editing:    editing == Some(item.id)
    })
    .collect::<Vec<_>>();

  let summary = if rows.is_empty() {
    None
  } else {
    Some(Summary::of(items))
  };

  ListView {
    dark: theme.is_dark(),
    rows,
    summary
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Summary,
    project
  };
  use crate::item::{
    Item,
    ItemId
  };
  use crate::theme::Theme;

  fn item(
    id: i64,
    completed: bool
  ) -> Item {
    let mut item = Item::new(
      ItemId(id),
      format!("task {id}"),
      "1/1/2026, 12:00:00 PM".to_string()
    );
    item.completed = completed;
    item
  }

  #[test]
  fn summary_counts_pending_and_completed() {
    let items = vec![
      item(1, false),
      item(2, true),
      item(3, true),
    ];
    let summary = Summary::of(&items);
    assert_eq!(summary.total(), 3);
    assert_eq!(
      summary.to_string(),
      "1 pending, 2 completed"
    );
  }

  #[test]
  fn empty_list_has_no_status_text() {
    let view = project(&[], Theme::Dark, None);
    assert!(view.is_empty());
    assert!(view.dark);
    assert_eq!(view.summary, None);
    assert_eq!(view.status_text(), "");
    assert!(!view.has_completed());
  }

  #[test]
  fn projection_is_idempotent() {
    let items =
      vec![item(2, true), item(1, false)];
    let first = project(
      &items,
      Theme::Light,
      Some(ItemId(1))
    );
    let second = project(
      &items,
      Theme::Light,
      Some(ItemId(1))
    );
    assert_eq!(first, second);
    assert_eq!(first.rows.len(), 2);
    assert!(first.rows[0].completed);
    assert!(!first.rows[0].editing);
    assert!(first.rows[1].editing);
    assert_eq!(
      first.status_text(),
      "1 pending, 1 completed"
    );
  }
}
