/// Short-lived status messages shown at the top of the window
use iced::widget::{container, text, Column};
use iced::{Border, Color, Element, Length};
use std::time::{Duration, Instant};

use crate::Message;

/// How long a notice stays on screen
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn color(self) -> Color {
        match self {
            NoticeKind::Success => Color::from_rgb8(0x2E, 0x7D, 0x32),
            NoticeKind::Info => Color::from_rgb8(0x15, 0x65, 0xC0),
            NoticeKind::Warning => Color::from_rgb8(0xEF, 0x6C, 0x00),
            NoticeKind::Error => Color::from_rgb8(0xC6, 0x28, 0x28),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    /// Show a notice. Repeating one that is still on screen restarts its
    /// lifetime instead of stacking a copy.
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|notice| notice.kind == kind && notice.text == text)
        {
            existing.shown_at = now;
            return;
        }
        self.items.push(Notice {
            kind,
            text,
            shown_at: now,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text, Instant::now());
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text, Instant::now());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Warning, text, Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text, Instant::now());
    }

    /// Drop notices older than `NOTICE_LIFETIME`
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|notice| now.saturating_duration_since(notice.shown_at) < NOTICE_LIFETIME);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn view(&self) -> Element<'_, Message> {
        let rows = self.items.iter().map(|notice| {
            let background = notice.kind.color();
            container(text(&notice.text).size(14))
                .padding([6, 12])
                .width(Length::Fill)
                .style(move |_theme| container::Style {
                    text_color: Some(Color::WHITE),
                    background: Some(background.into()),
                    border: Border {
                        radius: 4.0.into(),
                        ..Border::default()
                    },
                    ..container::Style::default()
                })
                .into()
        });

        Column::with_children(rows).spacing(4).into()
    }
}
