//! Storage Adapter - 本地音频文件

mod file_storage;

pub use file_storage::FileAudioStorage;
