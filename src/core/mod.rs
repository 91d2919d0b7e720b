pub mod engine;
pub mod extractor;
pub mod pipeline;
pub mod playlist;

pub use crate::domain::model::{
    ChannelEntry, PlaylistDocument, ScrapeReport, UrlSource, WrittenPlaylist,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
