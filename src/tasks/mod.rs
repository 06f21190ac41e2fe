pub mod capture_loop;
pub mod task_runner;
