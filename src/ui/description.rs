// SPDX-License-Identifier: MPL-2.0
//! Static description panel shown under the player.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::font::{Font, Weight};
use iced::widget::{column, container, text};
use iced::{Element, Length};

/// Title of the featured video.
pub const VIDEO_TITLE: &str = "Avatar analise completo";

const SEMIBOLD: Font = Font {
    weight: Weight::Semibold,
    ..Font::DEFAULT
};

pub fn view<'a, Message: 'a>(i18n: &I18n) -> Element<'a, Message> {
    let title = container(text(VIDEO_TITLE).size(typography::TITLE_SM).font(SEMIBOLD))
        .padding([0.0, spacing::XS]);

    let card = container(
        column![
            text(i18n.tr("description-views"))
                .size(typography::BODY)
                .font(SEMIBOLD),
            text(i18n.tr("description-body")).size(typography::BODY),
        ]
        .spacing(spacing::XXS),
    )
    .padding(spacing::XS)
    .width(Length::Fill)
    .style(styles::container::card);

    column![title, card]
        .spacing(spacing::XS)
        .padding([spacing::MD, 0.0])
        .width(Length::Fill)
        .into()
}
