pub mod decode;
pub mod engine;
pub mod message;
pub mod pipeline;

pub use crate::domain::model::{Link, LinkStat, Report, StatsWindow};
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
