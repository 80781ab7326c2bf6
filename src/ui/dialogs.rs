/// Blocking native dialogs
///
/// Alerts, confirmations and the file picker all block the UI thread
/// until the user answers. They sit behind a trait so the controller
/// can be driven without a display.
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

/// Image extensions offered by the file picker
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "ico"];

pub trait Dialogs: Send {
    /// Show a message and wait for the user to dismiss it
    fn alert(&self, message: &str);

    /// Ask a yes/no question. Returns true only on an explicit yes.
    fn confirm(&self, message: &str) -> bool;

    /// Let the user pick one image file
    fn pick_image(&self) -> Option<PathBuf>;
}

/// Dialogs backed by the platform's native widgets
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn alert(&self, message: &str) {
        MessageDialog::new()
            .set_title("Pixel Gallery")
            .set_description(message)
            .set_level(MessageLevel::Info)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn confirm(&self, message: &str) -> bool {
        let answer = MessageDialog::new()
            .set_title("Pixel Gallery")
            .set_description(message)
            .set_level(MessageLevel::Warning)
            .set_buttons(MessageButtons::YesNo)
            .show();

        matches!(answer, MessageDialogResult::Yes)
    }

    fn pick_image(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select Artwork Image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
    }
}
