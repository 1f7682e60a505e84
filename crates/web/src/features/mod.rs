pub mod analytics;
pub mod billing;
pub mod nutrition;
pub mod progress;
pub mod users;
pub mod workouts;
