use anyhow::anyhow;
use listo_shared::{
  AmbientPreference,
  Controller,
  KeyValueStore,
  SystemClock
};
use wasm_bindgen::JsValue;

const DARK_CLASS: &str = "dark";
const DARK_QUERY: &str =
  "(prefers-color-scheme: dark)";

/// `window.localStorage` behind the
/// shared store trait.
pub struct BrowserStore {
  storage: Option<web_sys::Storage>
}

impl BrowserStore {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });
    if storage.is_none() {
      tracing::warn!(
        "local storage unavailable; \
         changes will not persist"
      );
    }
    Self { storage }
  }
}

impl KeyValueStore for BrowserStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.storage.as_ref().and_then(
      |storage| {
        storage
          .get_item(key)
          .ok()
          .flatten()
      }
    ))
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let storage =
      self.storage.as_ref().ok_or_else(
        || {
          anyhow!(
            "local storage unavailable"
          )
        }
      )?;
    storage
      .set_item(key, value)
      .map_err(|err| js_error(key, err))
  }
}

fn js_error(
  key: &str,
  err: JsValue
) -> anyhow::Error {
  anyhow!(
    "failed writing {key} to local \
     storage: {err:?}"
  )
}

/// The browser's
/// `prefers-color-scheme` media query.
pub struct BrowserAmbient;

impl AmbientPreference for BrowserAmbient {
  fn prefers_dark(&self) -> Option<bool> {
    web_sys::window()?
      .match_media(DARK_QUERY)
      .ok()
      .flatten()
      .map(|query| query.matches())
  }
}

pub fn apply_theme_class(dark: bool) {
  let root = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.document_element()
    });

  if let Some(root) = root
    && let Err(err) = root
      .class_list()
      .toggle_with_force(DARK_CLASS, dark)
  {
    tracing::error!(
      error = ?err,
      "failed toggling dark class"
    );
  }
}

pub fn open_controller()
-> Controller<BrowserStore> {
  let mut controller = Controller::new(
    BrowserStore::open(),
    Box::new(SystemClock)
  );
  if let Err(error) =
    controller.load(&BrowserAmbient)
  {
    tracing::error!(
      error = %format!("{error:#}"),
      "failed loading task list"
    );
  }
  apply_theme_class(
    controller.theme().is_dark()
  );
  controller
}
