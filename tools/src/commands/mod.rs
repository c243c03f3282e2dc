pub mod console;
pub mod e2e;
pub mod perf;
pub mod screenshot;
pub mod snapshot;
