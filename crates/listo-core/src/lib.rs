pub mod ambient;
pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;
use std::io::{
  self,
  BufRead,
  Write
};

use anyhow::Context;
use clap::Parser;
use listo_shared::{
  Controller,
  SystemClock
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting listo CLI"
  );

  let mut cfg = config::Config::load(
    cli.listorc.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );
  debug!(
    files = cfg.loaded_files.len(),
    "configuration ready"
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let store =
    datastore::DataStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open datastore at \
         {}",
        data_dir.display()
      )
    })?;

  let ambient =
    ambient::TerminalAmbient::from_env(
      &cfg
    );
  let mut controller = Controller::new(
    store,
    Box::new(SystemClock)
  )
  .with_timestamp_format(
    cfg.date_format()
  );
  controller
    .load(&ambient)
    .context("failed to load task list")?;

  let renderer =
    render::Renderer::new(&cfg)?;
  let inv = cli::Invocation::parse(
    &cfg, cli.rest
  )?;

  commands::dispatch(
    &mut controller,
    &renderer,
    inv,
    &mut prompt_stdin
  )?;

  info!("done");
  Ok(())
}

/// Shows the current text on stderr and
/// reads one line from stdin.
fn prompt_stdin(
  current: &str
) -> anyhow::Result<Option<String>> {
  let mut err = io::stderr().lock();
  write!(
    err,
    "Edit task [{current}]: "
  )?;
  err.flush()?;

  let mut line = String::new();
  let read = io::stdin()
    .lock()
    .read_line(&mut line)?;
  if read == 0 {
    return Ok(None);
  }
  Ok(Some(
    line
      .trim_end_matches(['\r', '\n'])
      .to_string()
  ))
}
