//! Domain entities: tasks, notes, and the Pomodoro state machine.

pub mod note;
pub mod pomodoro;
pub mod task;

pub use note::{Note, PREVIEW_LEN};
pub use pomodoro::{Phase, PomodoroConfig, PomodoroEngine};
pub use task::{Priority, Task, TaskStatus, local_date_today, local_now};
