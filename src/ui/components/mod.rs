pub mod card;
pub mod gauge;
pub mod input;
pub mod map;
pub mod navbar;
pub mod spinner;

pub use card::StatCard;
pub use gauge::{humidity_gauge, percent_gauge, uv_gauge};
pub use input::{InputWidget, SuggestionList};
pub use map::MapView;
pub use navbar::{key_hints, NavBar};
pub use spinner::Spinner;
