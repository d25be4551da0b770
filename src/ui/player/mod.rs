// SPDX-License-Identifier: MPL-2.0
//! Video player view: surface plus control bar, arranged by [`PlayerLayout`].

pub mod controls;
pub mod layout;

pub use layout::{ControlsPlacement, PlayerLayout};

use crate::error::MediaError;
use crate::i18n::fluent::I18n;
use crate::player::{Message, PlayerState};
use crate::ui::design_tokens::typography;
use crate::ui::styles;
use iced::widget::{container, image, text, Column, Stack};
use iced::{alignment, ContentFit, Element, Length};

/// What the video surface currently shows.
#[derive(Debug, Clone, Copy)]
pub enum Surface<'a> {
    /// Decoder not ready or no frame yet.
    Loading,
    /// Last decoded frame.
    Frame(&'a image::Handle),
    /// Decoder gave up.
    Failed(&'a MediaError),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a PlayerState,
    pub surface: Surface<'a>,
}

fn video_surface<'a>(ctx: &ViewContext<'a>, layout: &PlayerLayout) -> Element<'a, Message> {
    let content: Element<'a, Message> = match ctx.surface {
        Surface::Frame(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Surface::Loading => text(ctx.i18n.tr("player-loading"))
            .size(typography::BODY)
            .into(),
        Surface::Failed(err) => text(ctx.i18n.tr(err.i18n_key()))
            .size(typography::BODY)
            .into(),
    };

    container(content)
        .width(layout.video_width)
        .height(layout.video_height)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::video_surface)
        .into()
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let layout = PlayerLayout::from_state(ctx.state);
    let surface = video_surface(&ctx, &layout);
    let controls = controls::view(ctx.state, ctx.i18n, layout.is_overlay());

    match layout.controls {
        ControlsPlacement::Below => Column::new()
            .push(surface)
            .push(controls)
            .width(Length::Fill)
            .into(),
        ControlsPlacement::Overlay => {
            let pinned = container(controls)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(alignment::Vertical::Bottom);

            Stack::new()
                .push(surface)
                .push(pinned)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}
