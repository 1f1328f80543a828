use std::collections::BTreeMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use listo_shared::clock::DEFAULT_TIMESTAMP_FORMAT;
use tracing::{
  debug,
  info,
  trace,
  warn
};

const RC_ENV_VAR: &str = "LISTORC";
const RC_FILE_NAME: &str = ".listorc";

/// Every key listo reads, with its
/// default.
const DEFAULTS: [(&str, &str); 5] = [
  ("data.location", "~/.listo"),
  ("default.command", "list"),
  ("color", "on"),
  ("date.format", DEFAULT_TIMESTAMP_FORMAT),
  ("theme.ambient", "auto")
];

/// How `theme.ambient` steers the
/// terminal colour-scheme hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientSetting {
  Auto,
  Dark,
  Light
}

#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Include(&'a str),
  Set {
    key:   &'a str,
    value: &'a str
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  values:           BTreeMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    Self {
      values:       DEFAULTS
        .iter()
        .map(|(key, value)| {
          (key.to_string(), value.to_string())
        })
        .collect(),
      loaded_files: Vec::new()
    }
  }
}

impl Config {
  /// Defaults, then the first rc file
  /// found: `--listorc`, `$LISTORC`,
  /// `~/.listorc`.
  #[tracing::instrument]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::default();

    match resolve_rc_path(rc_override) {
      | Some(path) => {
        info!(listorc = %path.display(), "loading listorc");
        cfg.load_file(&path)?;
      }
      | None => {
        debug!(
          "no listorc found; using \
           defaults"
        );
      }
    }

    Ok(cfg)
  }

  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      self.set(&key, value);
    }
  }

  pub fn default_command(&self) -> &str {
    self.setting("default.command")
  }

  pub fn date_format(&self) -> &str {
    self.setting("date.format")
  }

  pub fn color(
    &self
  ) -> anyhow::Result<bool> {
    match self
      .setting("color")
      .to_ascii_lowercase()
      .as_str()
    {
      | "on" | "yes" | "true" | "1" => {
        Ok(true)
      }
      | "off" | "no" | "false" | "0" => {
        Ok(false)
      }
      | other => {
        Err(anyhow!(
          "invalid color setting: {other}"
        ))
      }
    }
  }

  pub fn ambient(&self) -> AmbientSetting {
    match self
      .setting("theme.ambient")
      .to_ascii_lowercase()
      .as_str()
    {
      | "auto" => AmbientSetting::Auto,
      | "dark" => AmbientSetting::Dark,
      | "light" => AmbientSetting::Light,
      | other => {
        warn!(
          value = %other,
          "unknown theme.ambient; using auto"
        );
        AmbientSetting::Auto
      }
    }
  }

  /// `data.location` with a leading `~/`
  /// resolved against the home directory.
  pub fn data_location(
    &self
  ) -> anyhow::Result<PathBuf> {
    let raw = self.setting("data.location");
    let Some(rest) = raw.strip_prefix("~/")
    else {
      return Ok(PathBuf::from(raw));
    };
    let home =
      dirs::home_dir().ok_or_else(|| {
        anyhow!(
          "cannot determine home \
           directory for {raw}"
        )
      })?;
    Ok(home.join(rest))
  }

  /// The configured value, or the default
  /// when it was left blank.
  fn setting(&self, key: &str) -> &str {
    self
      .values
      .get(key)
      .map(|value| value.trim())
      .filter(|value| !value.is_empty())
      .or_else(|| default_for(key))
      .unwrap_or("")
  }

  fn set(
    &mut self,
    key: &str,
    value: String
  ) {
    if default_for(key).is_none() {
      warn!(key = %key, "unknown config key; ignoring");
      return;
    }
    self.values.insert(key.to_string(), value);
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;
    self.loaded_files.push(path.clone());

    let base_dir = path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from("."));

    for (idx, raw_line) in
      text.lines().enumerate()
    {
      let line = parse_line(raw_line)
        .with_context(|| {
          format!(
            "invalid config line {}:{}",
            path.display(),
            idx + 1
          )
        })?;

      match line {
        | None => {}
        | Some(RcLine::Include(target)) => {
          let include = base_dir.join(
            expand_tilde(Path::new(target))
          );
          self.include(&include)?;
        }
        | Some(RcLine::Set { key, value }) => {
          trace!(key = %key, value = %value, "loaded config key");
          self.set(key, value.to_string());
        }
      }
    }

    Ok(())
  }

  fn include(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    if self
      .loaded_files
      .iter()
      .any(|seen| seen == path)
    {
      warn!(include = %path.display(), "include cycle; skipping");
      return Ok(());
    }
    if !path.exists() {
      warn!(include = %path.display(), "include file does not exist; skipping");
      return Ok(());
    }
    self.load_file(path)
  }
}

/// Uses `--data` when given, else
/// `data.location`; creates the directory
/// if needed.
#[tracing::instrument(skip(cfg))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = match override_dir {
    | Some(path) => path.to_path_buf(),
    | None => cfg.data_location()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

fn default_for(
  key: &str
) -> Option<&'static str> {
  DEFAULTS
    .iter()
    .find(|(known, _)| *known == key)
    .map(|(_, value)| *value)
}

/// Strips comments and classifies one
/// rc line; blank lines yield `None`.
fn parse_line(
  raw: &str
) -> anyhow::Result<Option<RcLine<'_>>> {
  let line = raw
    .split_once('#')
    .map_or(raw, |(before, _)| before)
    .trim();
  if line.is_empty() {
    return Ok(None);
  }

  if let Some(target) =
    line.strip_prefix("include ")
  {
    let target = target.trim();
    if target.is_empty() {
      bail!("include path cannot be empty");
    }
    return Ok(Some(RcLine::Include(target)));
  }

  let (key, value) =
    line.split_once('=').ok_or_else(|| {
      anyhow!("expected key=value, got: {line}")
    })?;
  let key = key.trim();
  if key.is_empty() {
    bail!("missing key before '='");
  }

  Ok(Some(RcLine::Set {
    key,
    value: value.trim()
  }))
}

fn resolve_rc_path(
  override_path: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Ok(rc_env) =
    std::env::var(RC_ENV_VAR)
  {
    if rc_env == "/dev/null" {
      return None;
    }
    return Some(PathBuf::from(rc_env));
  }

  let Some(home) = dirs::home_dir() else {
    warn!(
      "cannot determine home \
       directory; skipping listorc"
    );
    return None;
  };
  let candidate = home.join(RC_FILE_NAME);
  candidate.exists().then_some(candidate)
}

fn expand_tilde(path: &Path) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::{
    AmbientSetting,
    Config,
    RcLine,
    parse_line,
    resolve_data_dir
  };

  #[test]
  fn rc_file_with_include_and_comments() {
    let dir = tempdir().expect("tempdir");
    let extra = dir.path().join("extra.rc");
    fs::write(
      &extra,
      "date.format=%Y-%m-%d\n"
    )
    .expect("write include");

    let rc = dir.path().join("listorc");
    fs::write(
      &rc,
      "# listo settings\n\
       color = off  # no ansi\n\
       include extra.rc\n\
       include extra.rc\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(&rc))
      .expect("load config");
    assert!(!cfg.color().expect("color"));
    assert_eq!(cfg.date_format(), "%Y-%m-%d");
    assert_eq!(cfg.default_command(), "list");
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn rejects_lines_without_equals() {
    let dir = tempdir().expect("tempdir");
    let rc = dir.path().join("listorc");
    fs::write(&rc, "color on\n")
      .expect("write rc");
    let err = Config::load(Some(&rc))
      .expect_err("bad line");
    assert!(
      format!("{err:#}").contains(":1")
    );
  }

  #[test]
  fn classifies_rc_lines() {
    assert_eq!(
      parse_line("  # only a comment")
        .expect("comment"),
      None
    );
    assert_eq!(
      parse_line("include ~/more.rc")
        .expect("include"),
      Some(RcLine::Include("~/more.rc"))
    );
    assert_eq!(
      parse_line(" color = on # yes")
        .expect("set"),
      Some(RcLine::Set {
        key:   "color",
        value: "on"
      })
    );
    assert!(parse_line("include ").is_err());
    assert!(parse_line("= on").is_err());
  }

  #[test]
  fn blank_and_unknown_values_fall_back() {
    let mut cfg = Config::default();
    cfg.apply_overrides([
      (
        "theme.ambient".to_string(),
        "sepia".to_string()
      ),
      (
        "date.format".to_string(),
        " ".to_string()
      ),
      (
        "report.next".to_string(),
        "ignored".to_string()
      ),
    ]);
    assert_eq!(
      cfg.ambient(),
      AmbientSetting::Auto
    );
    assert_eq!(
      cfg.date_format(),
      listo_shared::clock::DEFAULT_TIMESTAMP_FORMAT
    );
    assert!(
      !cfg.values.contains_key("report.next")
    );
  }

  #[test]
  fn color_setting_is_strict() {
    let mut cfg = Config::default();
    assert!(cfg.color().expect("default"));

    cfg.apply_overrides([(
      "color".to_string(),
      "No".to_string()
    )]);
    assert!(!cfg.color().expect("no"));

    cfg.apply_overrides([(
      "color".to_string(),
      "maybe".to_string()
    )]);
    assert!(cfg.color().is_err());
  }

  #[test]
  fn data_dir_is_created_under_location() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("nested/store");

    let mut cfg = Config::default();
    cfg.apply_overrides([(
      "data.location".to_string(),
      target.display().to_string()
    )]);

    let resolved = resolve_data_dir(&cfg, None)
      .expect("resolve");
    assert_eq!(resolved, target);
    assert!(target.is_dir());
  }
}
