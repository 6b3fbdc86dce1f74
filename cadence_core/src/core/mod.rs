//! # Core data model
//!
//! - **Task**: a request for a number of processor units
//! - **TaskQueue / TaskStack**: FIFO and LIFO task containers
//! - **Thread**: a periodic workload source owning one `TaskQueue`
//!
//! A task belongs to the thread that released it for its whole lifetime and
//! leaves that thread's queue the moment it completes.

pub mod queue;
pub mod task;
pub mod thread;

pub use queue::{TaskQueue, TaskStack};
pub use task::Task;
pub use thread::{Thread, ThreadSpec};
