mod periodic_task;
#[cfg(test)]
mod tests;

pub use periodic_task::{PeriodicTask, TaskHandle};
