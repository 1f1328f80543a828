use listo_shared::AmbientPreference;
use tracing::debug;

use crate::config::{
  AmbientSetting,
  Config
};

/// Terminal colour-scheme hint.
///
/// `theme.ambient` can force `dark` or
/// `light`; `auto` reads `COLORFGBG`.
#[derive(Debug, Clone)]
pub struct TerminalAmbient {
  forced:    Option<bool>,
  colorfgbg: Option<String>
}

impl TerminalAmbient {
  pub fn from_env(cfg: &Config) -> Self {
    let forced = match cfg.ambient() {
      | AmbientSetting::Dark => Some(true),
      | AmbientSetting::Light => Some(false),
      | AmbientSetting::Auto => None
    };

    Self {
      forced,
      colorfgbg: std::env::var("COLORFGBG")
        .ok()
    }
  }
}

impl AmbientPreference for TerminalAmbient {
  fn prefers_dark(&self) -> Option<bool> {
    if self.forced.is_some() {
      return self.forced;
    }
    let hint = self
      .colorfgbg
      .as_deref()
      .and_then(parse_colorfgbg);
    debug!(?hint, "terminal background hint");
    hint
  }
}

/// `COLORFGBG` is `fg;bg` or
/// `fg;default;bg`; the last field is the
/// background palette index.
fn parse_colorfgbg(
  raw: &str
) -> Option<bool> {
  let bg = raw
    .rsplit(';')
    .next()?
    .trim()
    .parse::<u8>()
    .ok()?;
  Some(matches!(bg, 0..=6 | 8))
}
