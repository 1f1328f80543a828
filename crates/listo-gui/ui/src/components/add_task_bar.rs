use yew::{
  Callback,
  Html,
  KeyboardEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct AddTaskBarProps {
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

#[function_component(AddTaskBar)]
pub fn add_task_bar(
  props: &AddTaskBarProps
) -> Html {
  let oninput = {
    let on_input = props.on_input.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  let onkeydown = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          e.prevent_default();
          on_submit.emit(());
        }
      }
    )
  };

  let onclick = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(move |_| {
      on_submit.emit(());
    })
  };

  html! {
      <div class="add-task">
          <input
              class="input"
              type="text"
              placeholder="What needs doing?"
              value={props.value.clone()}
              oninput={oninput}
              onkeydown={onkeydown}
          />
          <button class="btn primary" onclick={onclick}>{ "Add" }</button>
      </div>
  }
}
