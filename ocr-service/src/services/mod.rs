pub mod image;
pub mod metrics;
pub mod providers;

pub use self::image::{decode, DecodedImage, ImageDecodeError};
pub use providers::{ProviderError, VisionProvider};
