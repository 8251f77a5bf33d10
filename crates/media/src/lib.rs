mod bus;
pub mod error;
pub mod gst_init;
pub mod import;
pub mod metadata;
pub mod still;
pub mod video_surface;

pub use error::MediaError;
pub use metadata::probe_duration;
pub use still::decode_still;
pub use video_surface::{DecodedFrame, VideoSurface};
