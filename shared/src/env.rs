use std::path::PathBuf;

/// Loads variables from a `.env` file in the working directory or one of its
/// parents. Returns the file used, if any.
pub fn init() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}
