pub mod into_error_info;
