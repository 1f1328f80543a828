use crate::clock::{
  Clock,
  DEFAULT_TIMESTAMP_FORMAT,
  format_timestamp
};
use crate::item::{
  Item,
  ItemId,
  decode_items,
  encode_items,
  next_id,
  normalize_text
};
use crate::store::KeyValueStore;
use crate::theme::{
  AmbientPreference,
  THEME_STORAGE_KEY,
  Theme
};
use crate::view::{
  ListView,
  project
};

pub const TASKS_STORAGE_KEY: &str =
  "tasks";

/// Why an operation left everything
/// as it was.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NoOp {
  EmptyInput,
  NotFound,
  NothingCompleted,
  Cancelled
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Change {
  Added(ItemId),
  Toggled {
    id:        ItemId,
    completed: bool
  },
  Editing(ItemId),
  Edited(ItemId),
  Deleted(ItemId),
  Cleared(usize),
  ThemeChanged(Theme),
  Unchanged(NoOp)
}

impl Change {
  pub fn is_applied(&self) -> bool {
    !matches!(self, Self::Unchanged(_))
  }
}

/// A user-triggered event, keyed by
/// item id where one applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  Add(String),
  Toggle(ItemId),
  BeginEdit(ItemId),
  CommitEdit(String),
  CancelEdit,
  Delete(ItemId),
  ClearCompleted,
  ToggleTheme
}

/// An item in edit mode together with
/// the text it had when editing began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
  pub id:           ItemId,
  pub current_text: String
}

pub struct Controller<S> {
  store:            S,
  clock:            Box<dyn Clock>,
  items:            Vec<Item>,
  theme:            Theme,
  editing:          Option<PendingEdit>,
  timestamp_format: String
}

impl<S: KeyValueStore> Controller<S> {
  /// Empty controller; nothing is read
  /// until [`Controller::load`].
  pub fn new(
    store: S,
    clock: Box<dyn Clock>
  ) -> Self {
    Self {
      store,
      clock,
      items: Vec::new(),
      theme: Theme::default(),
      editing: None,
      timestamp_format:
        DEFAULT_TIMESTAMP_FORMAT
          .to_string()
    }
  }

  pub fn with_timestamp_format(
    mut self,
    pattern: &str
  ) -> Self {
    self.timestamp_format =
      pattern.to_string();
    self
  }

  pub fn initialize(
    store: S,
    clock: Box<dyn Clock>,
    ambient: &dyn AmbientPreference
  ) -> anyhow::Result<Self> {
    let mut controller =
      Self::new(store, clock);
    controller.load(ambient)?;
    Ok(controller)
  }

  #[tracing::instrument(skip_all)]
  pub fn load(
    &mut self,
    ambient: &dyn AmbientPreference
  ) -> anyhow::Result<()> {
    let raw_tasks =
      self.store.get(TASKS_STORAGE_KEY)?;
    self.items =
      decode_items(raw_tasks.as_deref());

    let raw_theme =
      self.store.get(THEME_STORAGE_KEY)?;
    self.theme = Theme::resolve(
      raw_theme.as_deref(),
      ambient.prefers_dark()
    );
    self.editing = None;

    tracing::info!(
      items = self.items.len(),
      theme = %self.theme,
      "loaded list state"
    );
    Ok(())
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  pub fn editing(
    &self
  ) -> Option<&PendingEdit> {
    self.editing.as_ref()
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn find(
    &self,
    id: ItemId
  ) -> Option<&Item> {
    self
      .items
      .iter()
      .find(|item| item.id == id)
  }

  pub fn handle(
    &mut self,
    event: Event
  ) -> anyhow::Result<Change> {
    let change = match event {
      | Event::Add(raw) => {
        self.add_item(&raw)?
      }
      | Event::Toggle(id) => {
        self.toggle_item(id)?
      }
      | Event::BeginEdit(id) => {
        match self.begin_edit(id) {
          | Some(_) => Change::Editing(id),
          | None => {
            Change::Unchanged(
              NoOp::NotFound
            )
          }
        }
      }
      | Event::CommitEdit(text) => {
        self.commit_edit(&text)?
      }
      | Event::CancelEdit => {
        self.cancel_edit()
      }
      | Event::Delete(id) => {
        self.delete_item(id)?
      }
      | Event::ClearCompleted => {
        self.clear_completed()?
      }
      | Event::ToggleTheme => {
        self.toggle_preference()?
      }
    };

    if let Change::Unchanged(reason) =
      change
    {
      tracing::debug!(
        ?reason,
        "event left state unchanged"
      );
    }
    Ok(change)
  }

  #[tracing::instrument(skip(self, raw))]
  pub fn add_item(
    &mut self,
    raw: &str
  ) -> anyhow::Result<Change> {
    let Some(text) = normalize_text(raw)
    else {
      return Ok(Change::Unchanged(
        NoOp::EmptyInput
      ));
    };

    let now = self.clock.now();
    let id = next_id(
      &self.items,
      now.timestamp_millis()
    );
    let created_at = format_timestamp(
      now,
      &self.timestamp_format
    );

    let mut next =
      Vec::with_capacity(
        self.items.len() + 1
      );
    next.push(Item::new(
      id, text, created_at
    ));
    next.extend(
      self.items.iter().cloned()
    );
    self.commit(next)?;

    tracing::info!(%id, "added item");
    Ok(Change::Added(id))
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle_item(
    &mut self,
    id: ItemId
  ) -> anyhow::Result<Change> {
    let mut next = self.items.clone();
    let Some(item) = next
      .iter_mut()
      .find(|item| item.id == id)
    else {
      return Ok(Change::Unchanged(
        NoOp::NotFound
      ));
    };

    item.completed = !item.completed;
    let completed = item.completed;
    self.commit(next)?;

    tracing::info!(
      %id,
      completed,
      "toggled item"
    );
    Ok(Change::Toggled { id, completed })
  }

  /// Replaces an item's text.
  ///
  /// `None` means the caller cancelled.
  /// Blank replacements are dropped and
  /// the original text is kept.
  #[tracing::instrument(skip(
    self,
    replacement
  ))]
  pub fn edit_item(
    &mut self,
    id: ItemId,
    replacement: Option<&str>
  ) -> anyhow::Result<Change> {
    if self.find(id).is_none() {
      return Ok(Change::Unchanged(
        NoOp::NotFound
      ));
    }

    if self
      .editing
      .as_ref()
      .is_some_and(|edit| edit.id == id)
    {
      self.editing = None;
    }

    let Some(replacement) = replacement
    else {
      return Ok(Change::Unchanged(
        NoOp::Cancelled
      ));
    };
    let Some(text) =
      normalize_text(replacement)
    else {
      return Ok(Change::Unchanged(
        NoOp::EmptyInput
      ));
    };

    let mut next = self.items.clone();
    if let Some(item) = next
      .iter_mut()
      .find(|item| item.id == id)
    {
      item.text = text;
    }
    self.commit(next)?;

    tracing::info!(%id, "edited item");
    Ok(Change::Edited(id))
  }

  /// Puts one item into edit mode,
  /// replacing any other pending edit.
  pub fn begin_edit(
    &mut self,
    id: ItemId
  ) -> Option<&PendingEdit> {
    let current_text =
      self.find(id)?.text.clone();
    self.editing = Some(PendingEdit {
      id,
      current_text
    });
    self.editing.as_ref()
  }

  pub fn commit_edit(
    &mut self,
    text: &str
  ) -> anyhow::Result<Change> {
    let Some(edit) = self.editing.take()
    else {
      return Ok(Change::Unchanged(
        NoOp::NotFound
      ));
    };
    self.edit_item(edit.id, Some(text))
  }

  pub fn cancel_edit(&mut self) -> Change {
    self.editing = None;
    Change::Unchanged(NoOp::Cancelled)
  }

  #[tracing::instrument(skip(self))]
  pub fn delete_item(
    &mut self,
    id: ItemId
  ) -> anyhow::Result<Change> {
    if self.find(id).is_none() {
      return Ok(Change::Unchanged(
        NoOp::NotFound
      ));
    }

    let next: Vec<Item> = self
      .items
      .iter()
      .filter(|item| item.id != id)
      .cloned()
      .collect();
    self.commit(next)?;

    tracing::info!(%id, "deleted item");
    Ok(Change::Deleted(id))
  }

  #[tracing::instrument(skip(self))]
  pub fn clear_completed(
    &mut self
  ) -> anyhow::Result<Change> {
    let (done, kept): (Vec<Item>, Vec<Item>) =
      self
        .items
        .iter()
        .cloned()
        .partition(|item| item.completed);
    if done.is_empty() {
      return Ok(Change::Unchanged(
        NoOp::NothingCompleted
      ));
    }

    self.commit(kept)?;

    tracing::info!(
      removed = done.len(),
      "cleared completed items"
    );
    Ok(Change::Cleared(done.len()))
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle_preference(
    &mut self
  ) -> anyhow::Result<Change> {
    let next = self.theme.toggled();
    self.store.set(
      THEME_STORAGE_KEY,
      next.storage_value()
    )?;
    self.theme = next;

    tracing::info!(theme = %next, "switched theme");
    Ok(Change::ThemeChanged(next))
  }

  pub fn render(&self) -> ListView {
    project(
      &self.items,
      self.theme,
      self.editing.as_ref().map(|edit| edit.id)
    )
  }

  /// Writes the new collection, then
  /// adopts it. A failed write leaves the
  /// in-memory state untouched.
  fn commit(
    &mut self,
    next: Vec<Item>
  ) -> anyhow::Result<()> {
    let raw = encode_items(&next)?;
    self
      .store
      .set(TASKS_STORAGE_KEY, &raw)?;
    self.items = next;

    if let Some(edit) = &self.editing
      && !self
        .items
        .iter()
        .any(|item| item.id == edit.id)
    {
      self.editing = None;
    }
    Ok(())
  }
}
