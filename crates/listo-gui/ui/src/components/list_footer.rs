use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ListFooterProps {
  pub status_text:        String,
  pub has_completed:      bool,
  pub on_clear_completed:
    Callback<MouseEvent>
}

#[function_component(ListFooter)]
pub fn list_footer(
  props: &ListFooterProps
) -> Html {
  html! {
      <div class="list-footer">
          <span class="task-count">{ props.status_text.clone() }</span>
          <button
              class="btn"
              disabled={!props.has_completed}
              onclick={props.on_clear_completed.clone()}
          >
              { "Clear completed" }
          </button>
      </div>
  }
}
