//! Native file chooser and error dialogs

use std::path::PathBuf;

/// Ask the user for a table to open. `None` means the chooser was cancelled.
pub fn pick_point_file() -> Option<PathBuf> {
    let path = rfd::FileDialog::new()
        .set_title("Open CSV File")
        .add_filter("CSV Files", &["csv"])
        .add_filter("All Files", &["*"])
        .pick_file();
    log::debug!("file chooser returned {:?}", path);
    path
}

/// Report a failed load in a modal message box
pub fn show_load_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Failed to load point cloud")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
