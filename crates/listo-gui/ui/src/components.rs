mod add_task_bar;
mod empty_state;
mod list_footer;
mod task_list;
mod task_list_row;
mod theme_toggle;

pub use add_task_bar::AddTaskBar;
pub use empty_state::EmptyState;
pub use list_footer::ListFooter;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use theme_toggle::ThemeToggle;
