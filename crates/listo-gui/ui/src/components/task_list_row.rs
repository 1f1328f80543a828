use listo_shared::{
  Event,
  RowView
};
use yew::{
  Callback,
  Html,
  KeyboardEvent,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:      RowView,
  pub on_event: Callback<Event>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.row.id;
  let draft =
    use_state(|| props.row.text.clone());

  {
    let draft = draft.clone();
    use_effect_with(
      (props.row.editing, props.row.text.clone()),
      move |(editing, text)| {
        if *editing {
          draft.set(text.clone());
        }
        || ()
      }
    );
  }

  if props.row.editing {
    let oninput = {
      let draft = draft.clone();
      Callback::from(
        move |e: web_sys::InputEvent| {
          let input: web_sys::HtmlInputElement =
            e.target_unchecked_into();
          draft.set(input.value());
        }
      )
    };

    let onkeydown = {
      let draft = draft.clone();
      let on_event =
        props.on_event.clone();
      Callback::from(
        move |e: KeyboardEvent| {
          if let Some(event) =
            edit_key_event(&e.key(), &draft)
          {
            e.prevent_default();
            on_event.emit(event);
          }
        }
      )
    };

    let on_save = {
      let draft = draft.clone();
      let on_event =
        props.on_event.clone();
      Callback::from(move |_| {
        on_event.emit(Event::CommitEdit(
          (*draft).clone()
        ));
      })
    };

    let on_cancel = {
      let on_event =
        props.on_event.clone();
      Callback::from(move |_| {
        on_event.emit(Event::CancelEdit);
      })
    };

    return html! {
        <li class="task-row editing">
            <input
                class="input"
                type="text"
                value={(*draft).clone()}
                oninput={oninput}
                onkeydown={onkeydown}
            />
            <button class="btn ok" onclick={on_save}>{ "Save" }</button>
            <button class="btn" onclick={on_cancel}>{ "Cancel" }</button>
        </li>
    };
  }

  let on_toggle = {
    let on_event = props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::Toggle(id));
    })
  };

  let on_edit = {
    let on_event = props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::BeginEdit(id));
    })
  };

  let on_delete = {
    let on_event = props.on_event.clone();
    Callback::from(move |_| {
      on_event.emit(Event::Delete(id));
    })
  };

  html! {
      <li class="task-row">
          <input
              type="checkbox"
              checked={props.row.completed}
              onchange={on_toggle}
          />
          <div class="task-body">
              <p class={classes!("task-text", props.row.completed.then_some("completed"))}>
                  { props.row.text.clone() }
              </p>
              <p class="task-created">{ props.row.created_at.clone() }</p>
          </div>
          <div class="task-actions">
              <button class="btn" title="Edit task" onclick={on_edit}>{ "Edit" }</button>
              <button class="btn danger" title="Delete task" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </li>
  }
}

/// Enter commits the draft, Escape
/// abandons it.
fn edit_key_event(
  key: &str,
  draft: &str
) -> Option<Event> {
  match key {
    | "Enter" => {
      Some(Event::CommitEdit(
        draft.to_string()
      ))
    }
    | "Escape" => Some(Event::CancelEdit),
    | _ => None
  }
}
