mod task;

pub use task::{Progress, Task, TaskStatus};
