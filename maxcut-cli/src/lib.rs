pub mod cli_helpers;
pub mod matrix_file;
