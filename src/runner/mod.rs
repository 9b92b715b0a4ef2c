//! Block invocation and event delivery.

pub mod handler;
pub mod invoker;
pub mod sink;

pub use handler::handler;
pub use invoker::Invoker;
pub use sink::{EventSink, MemorySink, SqsSink};
