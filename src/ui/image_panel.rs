/// The square area where the current cat is drawn
use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};

use crate::state::data::SaveReport;

/// Side length of the panel in logical pixels
const PANEL_SIZE: f32 = 420.0;

#[derive(Debug, Clone, Default)]
pub enum ImagePanel {
    /// Nothing fetched yet
    #[default]
    Empty,
    /// Bytes are on their way
    Loading { url: String },
    /// Downloaded, ready to draw
    Ready { url: String, handle: image::Handle },
    /// The download didn't work out
    Failed { url: String },
}

impl ImagePanel {
    pub fn loading(url: impl Into<String>) -> Self {
        Self::Loading { url: url.into() }
    }

    /// URL of the cat this panel is about, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Loading { url } | Self::Ready { url, .. } | Self::Failed { url } => Some(url),
        }
    }

    /// Apply a finished download. Reports for a cat we've moved on from are ignored.
    pub fn finish(&mut self, report: &SaveReport) {
        if self.url() != Some(report.url.as_str()) {
            return;
        }

        *self = match &report.bytes {
            Some(bytes) => Self::Ready {
                url: report.url.clone(),
                handle: image::Handle::from_bytes(bytes.clone()),
            },
            None => Self::Failed {
                url: report.url.clone(),
            },
        };
    }

    pub fn view<'a, Message: 'a>(&self) -> Element<'a, Message> {
        let content: Element<'a, Message> = match self {
            Self::Empty => text("Press the button to fetch a cat").size(16).into(),
            Self::Loading { .. } => text("Loading…").size(20).into(),
            Self::Ready { handle, .. } => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Self::Failed { .. } => text("⚠ Couldn't load this cat").size(20).into(),
        };

        container(content)
            .width(Length::Fixed(PANEL_SIZE))
            .height(Length::Fixed(PANEL_SIZE))
            .center_x(Length::Fixed(PANEL_SIZE))
            .center_y(Length::Fixed(PANEL_SIZE))
            .into()
    }
}
