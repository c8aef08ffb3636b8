pub mod delta;
pub mod doctor;
pub mod review;
pub mod score;

pub use delta::run_delta;
pub use doctor::run_doctor;
pub use review::run_review;
pub use score::run_score;
