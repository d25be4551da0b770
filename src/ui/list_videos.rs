// SPDX-License-Identifier: MPL-2.0
//! Related videos panel.
//!
//! Renders a fixed list of placeholder entries; nothing here reacts to the
//! player.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{column, container, row, text, Column, Space};
use iced::{Element, Length};

/// One entry of the related videos list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedVideo {
    pub title: &'static str,
    pub channel: &'static str,
    pub views: u64,
}

pub const RELATED_VIDEOS: [RelatedVideo; 4] = [
    RelatedVideo {
        title: "Big Buck Bunny",
        channel: "Blender Foundation",
        views: 1_260_000,
    },
    RelatedVideo {
        title: "Elephants Dream",
        channel: "Blender Foundation",
        views: 845_300,
    },
    RelatedVideo {
        title: "Sintel",
        channel: "Blender Foundation",
        views: 2_480_000,
    },
    RelatedVideo {
        title: "Tears of Steel",
        channel: "Blender Foundation",
        views: 97_400,
    },
];

/// Thumbnail placeholder height, keeping the 16:9 ratio of the main video.
const THUMBNAIL_HEIGHT: f32 = sizing::THUMBNAIL_WIDTH * 9.0 / 16.0;

/// Compact view count: `999`, `97.4K`, `1.3M`.
///
/// The unit is picked after rounding to one decimal, so `999_950` reads
/// `1.0M` rather than `1000.0K`.
pub fn format_views(views: u64) -> String {
    if views < 1_000 {
        return views.to_string();
    }
    let tenths_of_k = views.saturating_add(50) / 100;
    if tenths_of_k < 10_000 {
        return format!("{}.{}K", tenths_of_k / 10, tenths_of_k % 10);
    }
    let tenths_of_m = views.saturating_add(50_000) / 100_000;
    format!("{}.{}M", tenths_of_m / 10, tenths_of_m % 10)
}

fn entry<'a, Message: 'a>(video: &RelatedVideo, views_label: &str) -> Element<'a, Message> {
    let thumbnail = container(Space::new())
        .width(Length::Fixed(sizing::THUMBNAIL_WIDTH))
        .height(Length::Fixed(THUMBNAIL_HEIGHT))
        .style(styles::container::thumbnail);

    let details = column![
        text(video.title).size(typography::BODY),
        text(video.channel)
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
        text(format!("{} {}", format_views(video.views), views_label))
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
    ]
    .spacing(spacing::XXS);

    row![thumbnail, details].spacing(spacing::SM).into()
}

pub fn view<'a, Message: 'a>(i18n: &I18n) -> Element<'a, Message> {
    let views_label = i18n.tr("list-videos-views");

    let entries = RELATED_VIDEOS
        .iter()
        .fold(Column::new().spacing(spacing::SM), |list, video| {
            list.push(entry(video, &views_label))
        });

    column![
        text(i18n.tr("list-videos-title")).size(typography::TITLE_SM),
        entries
    ]
    .spacing(spacing::SM)
    .padding([spacing::MD, 0.0])
    .width(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_views_compacts_large_counts() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(97_400), "97.4K");
        assert_eq!(format_views(1_260_000), "1.3M");
    }

    #[test]
    fn format_views_switches_unit_after_rounding() {
        assert_eq!(format_views(1_000), "1.0K");
        assert_eq!(format_views(999_949), "999.9K");
        assert_eq!(format_views(999_950), "1.0M");
        assert_eq!(format_views(999_999), "1.0M");
        assert_eq!(format_views(1_000_000), "1.0M");
    }

    #[test]
    fn list_is_not_empty() {
        assert!(RELATED_VIDEOS.iter().all(|v| !v.title.is_empty()));
    }
}
