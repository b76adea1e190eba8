pub mod event;
pub mod image;
pub mod save_point;
pub mod settings;
pub mod view_mode;

pub use event::{Event, EventId, NewEvent};
pub use image::ImageData;
pub use settings::ViewSettings;
pub use view_mode::ViewMode;
