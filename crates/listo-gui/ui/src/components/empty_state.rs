use listo_shared::view::EMPTY_STATE_TEXT;
use yew::{
  Html,
  function_component,
  html
};

#[function_component(EmptyState)]
pub fn empty_state() -> Html {
  html! {
      <div class="empty-state">{ EMPTY_STATE_TEXT }</div>
  }
}
