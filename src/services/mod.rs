pub mod metadata;
pub mod popup;
pub mod selection;
pub mod window_detector;

pub use metadata::MetadataExtractor;
pub use popup::PopupPresenter;
pub use selection::create_selection_detector;
