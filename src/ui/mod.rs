/// Widgets for the single cat screen
///
/// - `image_panel.rs` - the current cat, or a placeholder while it loads
/// - `toast.rs` - the save notification

pub mod image_panel;
pub mod toast;

pub use image_panel::ImagePanel;
pub use toast::ToastSlot;
