mod storage;

use gloo::console::log;
use listo_shared::{
  Change,
  Event
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_state
};

use crate::components::{
  AddTaskBar,
  EmptyState,
  ListFooter,
  TaskList,
  ThemeToggle
};

#[function_component(App)]
pub fn app() -> Html {
  let controller =
    use_mut_ref(storage::open_controller);
  let force_update = use_force_update();
  let draft = use_state(String::new);

  let view = controller.borrow().render();
  let theme = controller.borrow().theme();

  {
    use_effect_with(
      view.dark,
      move |dark| {
        storage::apply_theme_class(*dark);
        || ()
      }
    );
  }

  let on_event = {
    let controller = controller.clone();
    let force_update = force_update.clone();
    let draft = draft.clone();
    Callback::from(move |event: Event| {
      let label = format!("{event:?}");
      let result = controller
        .borrow_mut()
        .handle(event);
      match result {
        | Ok(change) => {
          if let Change::Added(_) = change {
            draft.set(String::new());
          }
          ui_debug(
            "list.event",
            &format!("{label} -> {change:?}")
          );
        }
        | Err(error) => {
          tracing::error!(
            event = %label,
            error = %format!("{error:#}"),
            "list event failed"
          );
        }
      }
      force_update.force_update();
    })
  };

  let on_input = {
    let draft = draft.clone();
    Callback::from(move |value: String| {
      draft.set(value);
    })
  };

  let on_submit = {
    let draft = draft.clone();
    let on_event = on_event.clone();
    Callback::from(move |()| {
      on_event
        .emit(Event::Add((*draft).clone()));
    })
  };

  let on_toggle_theme = {
    let on_event = on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::ToggleTheme);
    })
  };

  let on_clear_completed = {
    let on_event = on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::ClearCompleted);
    })
  };

  html! {
      <div class="app">
          <header class="topbar">
              <h1 class="brand">{ "Listo" }</h1>
              <ThemeToggle
                  label={theme.toggle_label().to_string()}
                  on_toggle={on_toggle_theme}
              />
          </header>

          <AddTaskBar
              value={(*draft).clone()}
              on_input={on_input}
              on_submit={on_submit}
          />

          {
              if view.is_empty() {
                  html! { <EmptyState /> }
              } else {
                  html! {
                      <TaskList
                          rows={view.rows.clone()}
                          on_event={on_event.clone()}
                      />
                  }
              }
          }

          <ListFooter
              status_text={view.status_text()}
              has_completed={view.has_completed()}
              on_clear_completed={on_clear_completed}
          />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
