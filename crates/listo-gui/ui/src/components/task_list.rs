use listo_shared::{
  Event,
  RowView
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub rows:     Vec<RowView>,
  pub on_event: Callback<Event>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <ul class="panel task-list">
          {
              for props.rows.iter().cloned().map(|row| html! {
                  <TaskListRow
                      key={row.id.0}
                      row={row.clone()}
                      on_event={props.on_event.clone()}
                  />
              })
          }
      </ul>
  }
}
