mod scheduler;

pub use scheduler::TokioScheduler;
