pub mod category;
pub mod color;
pub mod record;
pub mod tracker;
pub mod weekday;

pub use category::TrackerCategory;
pub use color::TrackerColor;
pub use record::TrackerRecord;
pub use tracker::Tracker;
pub use weekday::{Schedule, WeekDay};
