pub mod categories;
pub mod db;
pub mod feed;
pub mod models;
pub mod settings;
pub mod store;
pub mod utils;

pub use categories::CategoryList;
pub use db::Database;
pub use feed::TrackerFeed;
pub use models::{Schedule, Tracker, TrackerCategory, TrackerColor, TrackerRecord, WeekDay};
pub use settings::SettingsStore;
pub use store::{CategoryStore, ChangeSubscription, RecordStore, StoreChange, TrackerStore};
