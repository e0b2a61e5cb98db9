pub mod clipboard;
pub mod config;
pub mod dashboard;
pub mod effect;
pub mod geolocation;
pub mod greeting;
pub mod input;
pub mod layout;
pub mod news;
pub mod preferences;
pub mod scroll;
pub mod session;
pub mod state;
pub mod theme;
pub mod toast;
pub mod weather;
pub mod wrap;

// Re-export main types for convenience
pub use clipboard::{Clipboard, ClipboardError};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardOptions};
pub use effect::{Effect, Reaction, Timer};
pub use geolocation::{Geolocator, LocationError, Position, PositionOptions};
pub use input::{InputEdit, InputTarget, SUGGESTIONS};
pub use news::NewsClient;
pub use preferences::PreferenceStore;
pub use state::{ChatMessage, ChatRole, MessageId, ViewMode};
pub use theme::ThemeMode;
