pub mod column_ops;
pub mod task_ops;
