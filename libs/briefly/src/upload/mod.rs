mod utils;

pub use utils::{decode_base64_payload, image_from_bytes, image_from_path, is_supported_image_path};
