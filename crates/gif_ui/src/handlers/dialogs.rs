//! Modal message dialogs.

use iced::Task;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::app::Message;

fn show(level: MessageLevel, title: &str, description: &str) -> Task<Message> {
    let title = title.to_string();
    let description = description.to_string();

    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(level)
                .set_title(title)
                .set_description(description)
                .set_buttons(MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::DialogClosed,
    )
}

pub fn info(title: &str, description: &str) -> Task<Message> {
    show(MessageLevel::Info, title, description)
}

pub fn warning(title: &str, description: &str) -> Task<Message> {
    show(MessageLevel::Warning, title, description)
}

pub fn error(title: &str, description: &str) -> Task<Message> {
    show(MessageLevel::Error, title, description)
}
