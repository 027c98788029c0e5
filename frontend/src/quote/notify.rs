use yew::Callback;
use yew_router::prelude::Navigator;

use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message for the user. Showing and dismissing it is up to
/// whoever implements [`Notifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl Notifier for Callback<Notice> {
    fn notify(&self, notice: Notice) {
        self.emit(notice);
    }
}

/// Fire-and-forget request to leave the wizard for the landing page.
pub trait Navigate {
    fn go_home(&self);
}

impl Navigate for Navigator {
    fn go_home(&self) {
        self.push(&Route::Home);
    }
}
