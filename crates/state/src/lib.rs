pub mod format;
pub mod geometry;
pub mod ingest;
pub mod item;
pub mod project;
pub mod selection;
pub mod timeline;
