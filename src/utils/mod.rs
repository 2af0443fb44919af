pub mod environment;
pub mod paths;

pub use environment::get_claude_dir;
pub use paths::{
    decode_project_dir_name, format_path_with_tilde, project_id, safe_open_file,
    validate_path_not_symlink,
};
