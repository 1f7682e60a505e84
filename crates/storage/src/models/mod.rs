pub mod exercise;
pub mod meal_entry;
pub mod personal_record;
pub mod progress_photo;
pub mod recipe;
pub mod subscription;
pub mod user;
pub mod workout_program;
pub mod workout_session;
pub mod workout_set;

pub use exercise::Exercise;
pub use meal_entry::MealEntry;
pub use personal_record::PersonalRecord;
pub use progress_photo::ProgressPhoto;
pub use recipe::Recipe;
pub use subscription::{Plan, Subscription};
pub use user::User;
pub use workout_program::WorkoutProgram;
pub use workout_session::WorkoutSession;
pub use workout_set::WorkoutSet;
