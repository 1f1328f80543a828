use anyhow::{Context, anyhow};
use listo_shared::html::render_fragment;
use listo_shared::{Change, Controller, Item, ItemId, KeyValueStore, Theme};
use tracing::{debug, instrument, warn};

use crate::cli::Invocation;
use crate::render::Renderer;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "list",
        "add",
        "toggle",
        "edit",
        "delete",
        "clear-completed",
        "theme",
        "html",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

/// What a command produced, before anything is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed,
    Changed(Change),
    ShowTheme(Theme),
    Html(String),
}

/// Asks the user for replacement text given the current text. `None` means
/// the user gave up (EOF).
pub type EditPrompt<'a> = dyn FnMut(&str) -> anyhow::Result<Option<String>> + 'a;

#[instrument(skip(controller, renderer, inv, prompt))]
pub fn dispatch<S: KeyValueStore>(
    controller: &mut Controller<S>,
    renderer: &Renderer,
    inv: Invocation,
    prompt: &mut EditPrompt<'_>,
) -> anyhow::Result<()> {
    let outcome = execute(controller, inv, prompt)?;
    debug!(?outcome, "command finished");

    match outcome {
        Outcome::Listed => renderer.print_list(&controller.render()),
        Outcome::Changed(change) => {
            if let Some(message) = describe(change) {
                renderer.print_line(&message)?;
            }
            renderer.print_list(&controller.render())
        }
        Outcome::ShowTheme(theme) => renderer.print_line(&format!("theme: {theme}")),
        Outcome::Html(fragment) => {
            renderer.print_line(fragment.trim_end())
        }
    }
}

#[instrument(skip(controller, prompt), fields(command = %inv.command))]
pub fn execute<S: KeyValueStore>(
    controller: &mut Controller<S>,
    inv: Invocation,
    prompt: &mut EditPrompt<'_>,
) -> anyhow::Result<Outcome> {
    let args = inv.command_args;

    let outcome = match inv.command.as_str() {
        "list" => {
            if !args.is_empty() {
                warn!(ignored = ?args, "list takes no arguments");
            }
            Outcome::Listed
        }
        "add" => Outcome::Changed(controller.add_item(&args.join(" "))?),
        "toggle" => {
            let id = target(controller.items(), &args, "toggle")?;
            Outcome::Changed(controller.toggle_item(id)?)
        }
        "delete" => {
            let id = target(controller.items(), &args, "delete")?;
            Outcome::Changed(controller.delete_item(id)?)
        }
        "edit" => {
            let id = target(controller.items(), &args, "edit")?;
            Outcome::Changed(edit(controller, id, &args[1..], prompt)?)
        }
        "clear-completed" => Outcome::Changed(controller.clear_completed()?),
        "theme" => match args.first().map(String::as_str) {
            None | Some("toggle") => Outcome::Changed(controller.toggle_preference()?),
            Some("show") => Outcome::ShowTheme(controller.theme()),
            Some(other) => return Err(anyhow!("unknown theme action: {other}")),
        },
        "html" => Outcome::Html(render_fragment(&controller.render())),
        other => return Err(anyhow!("unknown command: {other}")),
    };

    Ok(outcome)
}

fn edit<S: KeyValueStore>(
    controller: &mut Controller<S>,
    id: ItemId,
    words: &[String],
    prompt: &mut EditPrompt<'_>,
) -> anyhow::Result<Change> {
    if !words.is_empty() {
        return controller.edit_item(id, Some(&words.join(" ")));
    }

    let Some(pending) = controller.begin_edit(id) else {
        return controller.edit_item(id, None);
    };
    let current = pending.current_text.clone();

    match prompt(&current).context("failed reading replacement text")? {
        Some(line) if !line.trim().is_empty() => controller.commit_edit(&line),
        _ => Ok(controller.cancel_edit()),
    }
}

/// Resolves a command target: an item id, or else a 1-based row number.
fn target(items: &[Item], args: &[String], command: &str) -> anyhow::Result<ItemId> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("{command} requires an item id or row number"))?;
    let id: ItemId = raw
        .parse()
        .with_context(|| format!("expected an item id or row number, got: {raw}"))?;

    if items.iter().any(|item| item.id == id) {
        return Ok(id);
    }

    let row = usize::try_from(id.0).ok().filter(|row| (1..=items.len()).contains(row));
    match row {
        Some(row) => {
            let resolved = items[row - 1].id;
            debug!(row, id = %resolved, "resolved row number to item id");
            Ok(resolved)
        }
        None => Ok(id),
    }
}

fn describe(change: Change) -> Option<String> {
    match change {
        Change::Added(id) => Some(format!("Added task {id}.")),
        Change::Toggled { id, completed: true } => Some(format!("Completed task {id}.")),
        Change::Toggled { id, completed: false } => Some(format!("Reopened task {id}.")),
        Change::Edited(id) => Some(format!("Edited task {id}.")),
        Change::Deleted(id) => Some(format!("Deleted task {id}.")),
        Change::Cleared(count) => Some(format!("Cleared {count} completed task(s).")),
        Change::ThemeChanged(theme) => Some(format!("Theme set to {theme}.")),
        Change::Editing(_) | Change::Unchanged(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use listo_shared::{
        Change, Controller, FixedClock, ItemId, MemoryStore, NoAmbientPreference, NoOp, Theme,
    };

    use super::{Outcome, execute, expand_command_abbrev, known_command_names};
    use crate::cli::Invocation;

    fn controller() -> Controller<MemoryStore> {
        let at = FixedOffset::east_opt(0)
            .expect("offset")
            .with_ymd_and_hms(2026, 5, 1, 8, 0, 0)
            .single()
            .expect("valid time");
        Controller::initialize(MemoryStore::new(), Box::new(FixedClock(at)), &NoAmbientPreference)
            .expect("initialize")
    }

    fn inv(command: &str, args: &[&str]) -> Invocation {
        Invocation {
            command: command.to_string(),
            command_args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    fn no_prompt(_: &str) -> anyhow::Result<Option<String>> {
        panic!("prompt should not be used");
    }

    fn run(list: &mut Controller<MemoryStore>, command: &str, args: &[&str]) -> Outcome {
        execute(list, inv(command, args), &mut no_prompt).expect("execute")
    }

    #[test]
    fn abbreviation_must_be_unique() {
        let known = known_command_names();
        assert_eq!(expand_command_abbrev("del", &known), Some("delete"));
        assert_eq!(expand_command_abbrev("h", &known), Some("html"));
        assert_eq!(expand_command_abbrev("t", &known), None);
    }

    #[test]
    fn add_joins_words() {
        let mut list = controller();
        let outcome = run(&mut list, "add", &["buy", "milk"]);
        assert!(matches!(outcome, Outcome::Changed(Change::Added(_))));
        assert_eq!(list.items()[0].text, "buy milk");

        assert_eq!(
            run(&mut list, "add", &[]),
            Outcome::Changed(Change::Unchanged(NoOp::EmptyInput))
        );
    }

    #[test]
    fn targets_accept_row_numbers() {
        let mut list = controller();
        run(&mut list, "add", &["first"]);
        run(&mut list, "add", &["second"]);
        let second = list.items()[0].id;

        let outcome = run(&mut list, "toggle", &["1"]);
        assert_eq!(
            outcome,
            Outcome::Changed(Change::Toggled {
                id: second,
                completed: true
            })
        );

        let first = list.items()[1].id;
        let raw = first.to_string();
        assert_eq!(
            run(&mut list, "delete", &[raw.as_str()]),
            Outcome::Changed(Change::Deleted(first))
        );
        assert_eq!(
            run(&mut list, "delete", &["99"]),
            Outcome::Changed(Change::Unchanged(NoOp::NotFound))
        );
    }

    #[test]
    fn target_is_required() {
        let mut list = controller();
        assert!(execute(&mut list, inv("toggle", &[]), &mut no_prompt).is_err());
        assert!(execute(&mut list, inv("delete", &["abc"]), &mut no_prompt).is_err());
    }

    #[test]
    fn edit_with_inline_text() {
        let mut list = controller();
        run(&mut list, "add", &["draft"]);
        let id = list.items()[0].id;

        assert_eq!(
            run(&mut list, "edit", &["1", "final", "copy"]),
            Outcome::Changed(Change::Edited(id))
        );
        assert_eq!(list.items()[0].text, "final copy");
    }

    #[test]
    fn edit_prompts_with_current_text() {
        let mut list = controller();
        run(&mut list, "add", &["draft"]);

        let mut seen = Vec::new();
        let mut prompt = |current: &str| -> anyhow::Result<Option<String>> {
            seen.push(current.to_string());
            Ok(Some("  polished  ".to_string()))
        };
        execute(&mut list, inv("edit", &["1"]), &mut prompt).expect("edit");

        assert_eq!(seen, vec!["draft".to_string()]);
        assert_eq!(list.items()[0].text, "polished");
    }

    #[test]
    fn edit_prompt_eof_or_blank_cancels() {
        let mut list = controller();
        run(&mut list, "add", &["keep"]);

        for answer in [None, Some("   ".to_string())] {
            let mut prompt = |_: &str| -> anyhow::Result<Option<String>> { Ok(answer.clone()) };
            let outcome = execute(&mut list, inv("edit", &["1"]), &mut prompt).expect("edit");
            assert_eq!(outcome, Outcome::Changed(Change::Unchanged(NoOp::Cancelled)));
        }
        assert_eq!(list.items()[0].text, "keep");
        assert!(list.editing().is_none());
    }

    #[test]
    fn theme_toggles_and_shows() {
        let mut list = controller();
        assert_eq!(
            run(&mut list, "theme", &[]),
            Outcome::Changed(Change::ThemeChanged(Theme::Dark))
        );
        assert_eq!(run(&mut list, "theme", &["show"]), Outcome::ShowTheme(Theme::Dark));
        assert!(execute(&mut list, inv("theme", &["blue"]), &mut no_prompt).is_err());
    }

    #[test]
    fn html_escapes_item_text() {
        let mut list = controller();
        run(&mut list, "add", &["<b>bold</b>"]);
        let Outcome::Html(fragment) = run(&mut list, "html", &[]) else {
            panic!("expected html outcome");
        };
        assert!(fragment.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!fragment.contains("<b>"));
    }

    #[test]
    fn clear_completed_removes_done_rows() {
        let mut list = controller();
        run(&mut list, "add", &["a"]);
        run(&mut list, "add", &["b"]);
        run(&mut list, "toggle", &["2"]);

        assert_eq!(
            run(&mut list, "clear-completed", &[]),
            Outcome::Changed(Change::Cleared(1))
        );
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].text, "b");
        assert!(list.find(ItemId(0)).is_none());
    }
}
