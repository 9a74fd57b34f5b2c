//! UI components

mod header;
mod input_bar;
mod message_list;
mod sidebar;
mod welcome;

pub use header::Header;
pub use input_bar::InputBar;
pub use message_list::MessageList;
pub use sidebar::Sidebar;
pub use welcome::Welcome;
