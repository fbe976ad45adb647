//! UI Components
//!
//! Reusable Leptos components.

mod add_content_form;
mod checklist_card;
mod clipboard_card;
mod confirm_button;
mod content_list;
mod lan_sharing_control;
mod note_card;
mod notification_list;
mod pin_form;

pub use add_content_form::AddContentForm;
pub use checklist_card::ChecklistCard;
pub use clipboard_card::ClipboardCard;
pub use confirm_button::ConfirmButton;
pub use content_list::ContentList;
pub use lan_sharing_control::LanSharingControl;
pub use note_card::NoteCard;
pub use notification_list::NotificationList;
pub use pin_form::PinForm;
