pub mod event_loop;
pub mod rendering;
pub mod state;
pub mod theme;

pub use state::MapApp;
