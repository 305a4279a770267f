//! The task capability.
//!
//! A task is an opaque value carrying a single zero-argument `run` operation.
//! It has no identity beyond itself, is immutable once submitted, and is
//! consumed by execution. Tasks report nothing back to the executor; callers
//! that need results close over a shared, externally-synchronized accumulator.

/// The minimal behavioral requirement a value must satisfy to be schedulable.
///
/// Execution consumes the task, which is why `run` takes `self: Box<Self>`:
/// the executor only ever holds tasks as boxed trait objects, and a task is
/// dropped as soon as its body returns.
///
/// Any `FnOnce() + Send` closure is runnable via the blanket impl, so most
/// callers never implement this trait by hand:
///
/// ```
/// use spindle_core::Runnable;
///
/// let task: Box<dyn Runnable> = Box::new(|| println!("hello"));
/// task.run();
/// ```
pub trait Runnable: Send {
    /// Execute the task, consuming it.
    fn run(self: Box<Self>);
}

impl<F> Runnable for F
where
    F: FnOnce() + Send,
{
    fn run(self: Box<Self>) {
        (*self)();
    }
}
