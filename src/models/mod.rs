pub mod city;
pub mod condition;
pub mod event;
pub mod forecast;

pub use city::*;
pub use condition::*;
pub use event::*;
pub use forecast::*;
