pub mod fetcher;
pub mod mapper;
pub mod models;
pub mod monitor;

pub use fetcher::Fetcher;
pub use mapper::RecordMapper;
pub use monitor::{spawn_shutdown_listener, CycleReport, FeedMonitor};
