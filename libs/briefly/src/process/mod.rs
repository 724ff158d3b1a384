mod types;
pub use types::{PipelineError, ProcessorConfig, SummaryReport};

mod utils;
pub use utils::{extract_image_text, process_image, process_text, summarize_extracted};
