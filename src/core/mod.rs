//! Definition bundle preparation and credential storage.

pub mod credentials;
pub mod downloader;
pub mod extractor;
pub mod patcher;
