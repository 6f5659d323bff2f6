//! Page components.

pub mod contact;
pub mod header;
pub mod network;
pub mod notification;
pub mod reveal;
pub mod theme_toggle;

pub use contact::ContactForm;
pub use header::SiteHeader;
pub use network::NetworkBackground;
pub use notification::{Notification, NotificationKind, Notifier};
pub use theme_toggle::ThemeToggle;
