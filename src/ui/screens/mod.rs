pub mod dashboard;
pub mod event;

pub use dashboard::{DashboardScreen, HeroPanel};
pub use event::{EventCard, PlannerForm};
