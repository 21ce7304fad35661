pub mod scenario;
pub mod step;
