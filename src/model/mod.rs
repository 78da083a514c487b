pub mod category;
pub mod record;
pub mod window;

pub use category::FileCategory;
pub use record::{keys, FieldValue, MetadataRecord};
pub use window::WindowInfo;
