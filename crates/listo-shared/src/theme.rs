use serde::{
  Deserialize,
  Serialize
};

pub const THEME_STORAGE_KEY: &str =
  "theme";

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub fn is_dark(self) -> bool {
    matches!(self, Self::Dark)
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "Dark mode",
      | Self::Dark => "Light mode"
    }
  }

  /// Resolves the effective theme.
  ///
  /// A non-empty stored value is an
  /// explicit choice: only an exact
  /// `"dark"` selects dark, anything else
  /// selects light. An empty or missing
  /// value defers to the host signal.
  pub fn resolve(
    stored: Option<&str>,
    ambient_dark: Option<bool>
  ) -> Self {
    match stored {
      | Some("dark") => Self::Dark,
      | Some(value) if !value.is_empty() => {
        Self::Light
      }
      | _ => {
        if ambient_dark.unwrap_or(false)
        {
          Self::Dark
        } else {
          Self::Light
        }
      }
    }
  }
}

impl std::fmt::Display for Theme {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    f.write_str(self.storage_value())
  }
}

/// Host-provided hint about the
/// preferred colour scheme.
pub trait AmbientPreference {
  fn prefers_dark(&self) -> Option<bool>;
}

/// Signal for hosts that have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAmbientPreference;

impl AmbientPreference
  for NoAmbientPreference
{
  fn prefers_dark(&self) -> Option<bool> {
    None
  }
}

impl AmbientPreference for Option<bool> {
  fn prefers_dark(&self) -> Option<bool> {
    *self
  }
}
