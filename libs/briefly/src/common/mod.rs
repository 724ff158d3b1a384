mod utils;
mod types;
mod path_utils;

pub use utils::get_current_timestamp_str;
pub use utils::word_count;
pub use types::InputType;
pub use path_utils::{default_summary_file_name, save_summary};
