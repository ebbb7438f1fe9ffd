//! Response transcoding from upstream results to client responses

pub mod image;
pub mod text;

pub use self::image::{transcode_image, PngImage, PNG_MEDIA_TYPE};
pub use self::text::{split_segments, transcode_text, ResponseShape};
