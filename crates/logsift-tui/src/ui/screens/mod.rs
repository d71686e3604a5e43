//! Screen implementations

mod filter_screen;

pub use filter_screen::FilterScreen;
