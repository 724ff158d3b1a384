mod utils;

pub use utils::{clean_text, smart_clean, structure_ocr_text};
