//! Static HTML rendering of a
//! [`ListView`].
//!
//! Row affordances carry `data-action`
//! and `data-id` attributes keyed by item
//! id.

use std::fmt;

use crate::view::{
  EMPTY_STATE_TEXT,
  ListView,
  RowView
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
enum RowAction {
  Toggle,
  Edit,
  Delete
}

impl fmt::Display for RowAction {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(match self {
      | Self::Toggle => "toggle",
      | Self::Edit => "edit",
      | Self::Delete => "delete"
    })
  }
}

/// Escapes text so it can only ever be
/// read as character data.
pub fn escape_html(text: &str) -> String {
  let mut out =
    String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | other => out.push(other)
    }
  }
  out
}

/// A [`ListView`] formatted as an HTML
/// fragment.
pub struct HtmlFragment<'a> {
  view: &'a ListView
}

impl<'a> HtmlFragment<'a> {
  pub fn new(view: &'a ListView) -> Self {
    Self { view }
  }
}

impl fmt::Display for HtmlFragment<'_> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    let view = self.view;
    let root_class = if view.dark {
      "listo dark"
    } else {
      "listo"
    };
    writeln!(
      f,
      "<div class=\"{root_class}\">"
    )?;

    if view.is_empty() {
      writeln!(
        f,
        "  <div class=\"empty-state\">{}</div>",
        escape_html(EMPTY_STATE_TEXT)
      )?;
    } else {
      writeln!(f, "  <ul class=\"task-list\">")?;
      for row in &view.rows {
        write_row(f, row)?;
      }
      writeln!(f, "  </ul>")?;
    }

    writeln!(
      f,
      "  <p class=\"task-count\">{}</p>",
      escape_html(&view.status_text())
    )?;
    writeln!(f, "</div>")
  }
}

pub fn render_fragment(
  view: &ListView
) -> String {
  HtmlFragment::new(view).to_string()
}

fn write_row(
  f: &mut fmt::Formatter<'_>,
  row: &RowView
) -> fmt::Result {
  let id = row.id;
  let checked = if row.completed {
    " checked"
  } else {
    ""
  };
  let text_class = if row.completed {
    "task-text completed"
  } else {
    "task-text"
  };

  writeln!(
    f,
    "    <li class=\"task-row\" data-id=\"{id}\">"
  )?;
  writeln!(
    f,
    "      <input type=\"checkbox\" data-action=\"{}\" data-id=\"{id}\"{checked}>",
    RowAction::Toggle
  )?;
  writeln!(
    f,
    "      <p class=\"{text_class}\">{}</p>",
    escape_html(&row.text)
  )?;
  writeln!(
    f,
    "      <p class=\"task-created\">{}</p>",
    escape_html(&row.created_at)
  )?;
  writeln!(
    f,
    "      <button data-action=\"{}\" data-id=\"{id}\" title=\"Edit task\">Edit</button>",
    RowAction::Edit
  )?;
  writeln!(
    f,
    "      <button data-action=\"{}\" data-id=\"{id}\" title=\"Delete task\">Delete</button>",
    RowAction::Delete
  )?;
  writeln!(f, "    </li>")
}

#[cfg(test)]
mod tests {
  use std::fmt::{
    self,
    Write
  };

  use super::{
    HtmlFragment,
    escape_html,
    render_fragment
  };
  use crate::item::{
    Item,
    ItemId
  };
  use crate::theme::Theme;
  use crate::view::project;

  #[test]
  fn escapes_markup_significant_characters() {
    assert_eq!(
      escape_html(
        "<a href=\"x\">Tom & 'Jerry'</a>"
      ),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; \
       &#39;Jerry&#39;&lt;/a&gt;"
    );
  }

  #[test]
  fn item_text_never_becomes_markup() {
    let items = vec![Item::new(
      ItemId(7),
      "<script>x</script>".to_string(),
      "now".to_string()
    )];
    let html = render_fragment(&project(
      &items,
      Theme::Light,
      None
    ));

    assert!(!html.contains("<script>"));
    assert!(!html.contains("</script>"));
    assert!(html.contains(
      "&lt;script&gt;x&lt;/script&gt;"
    ));
  }

  #[test]
  fn empty_view_shows_indicator_only() {
    let html = render_fragment(&project(
      &[],
      Theme::Dark,
      None
    ));
    assert!(
      html.starts_with("<div class=\"listo dark\">")
    );
    assert!(html.contains("empty-state"));
    assert!(!html.contains("task-list"));
    assert!(html.contains(
      "<p class=\"task-count\"></p>"
    ));
  }

  #[test]
  fn rows_carry_actions_keyed_by_id() {
    let mut done = Item::new(
      ItemId(11),
      "done".to_string(),
      "t".to_string()
    );
    done.completed = true;
    let html = render_fragment(&project(
      &[done],
      Theme::Light,
      None
    ));

    assert!(html.contains(
      "data-action=\"toggle\" data-id=\"11\" checked"
    ));
    assert!(html.contains(
      "data-action=\"edit\" data-id=\"11\""
    ));
    assert!(html.contains(
      "data-action=\"delete\" data-id=\"11\""
    ));
    assert!(
      html.contains("task-text completed")
    );
    assert!(html.contains(
      "0 pending, 1 completed"
    ));
  }

  struct Bounded {
    room: usize
  }

  impl Write for Bounded {
    fn write_str(
      &mut self,
      s: &str
    ) -> fmt::Result {
      self.room = self
        .room
        .checked_sub(s.len())
        .ok_or(fmt::Error)?;
      Ok(())
    }
  }

  #[test]
  fn sink_errors_surface_from_fragment() {
    let items = vec![Item::new(
      ItemId(1),
      "a fairly long task text".to_string(),
      "now".to_string()
    )];
    let view =
      project(&items, Theme::Light, None);

    let mut tight = Bounded { room: 40 };
    assert!(
      write!(tight, "{}", HtmlFragment::new(&view))
        .is_err()
    );

    let mut roomy = Bounded {
      room: usize::MAX
    };
    assert!(
      write!(roomy, "{}", HtmlFragment::new(&view))
        .is_ok()
    );
  }
}
