/// Image merge page: intake, tile grid, options and result
use iced::widget::image::Handle;
use iced::widget::{button, checkbox, column, container, image, pick_list, row, text, text_input, Column, Row};
use iced::{Border, Color, Degrees, Element, Length, Radians};
use std::collections::HashMap;

use crate::collection::view::{project, Tile};
use crate::collection::{ImageCollection, ImageId, Rotation};
use crate::merge::{Alignment, Direction, MergeForm, MergeSession, OutputFormat};
use crate::Message;

const TILE_SIZE: f32 = 160.0;

fn tile<'a>(tile: Tile, preview: Option<&'a Handle>) -> Element<'a, Message> {
    let id = tile.id;

    let picture: Element<'a, Message> = match preview {
        Some(handle) => image(handle.clone())
            .width(TILE_SIZE)
            .height(TILE_SIZE)
            .rotation(iced::Rotation::Solid(Radians::from(Degrees(f32::from(
                tile.rotation.degrees(),
            )))))
            .into(),
        None => container(text("…"))
            .center(Length::Fixed(TILE_SIZE))
            .into(),
    };

    let selected = tile.selected;
    container(
        column![
            picture,
            text(format!("{}. {}", tile.position, tile.name)).size(12),
            row![
                checkbox("", selected).on_toggle(move |_| Message::ToggleSelect(id)),
                pick_list(Rotation::ALL, Some(tile.rotation), move |r| Message::Rotate(id, r)),
                button("✕").on_press(Message::Remove(id)),
            ]
            .spacing(6),
        ]
        .spacing(6)
        .width(TILE_SIZE),
    )
    .padding(8)
    .style(move |theme: &iced::Theme| {
        let palette = theme.extended_palette();
        container::Style {
            border: Border {
                color: if selected {
                    palette.primary.strong.color
                } else {
                    palette.background.strong.color
                },
                width: if selected { 2.0 } else { 1.0 },
                radius: 6.0.into(),
            },
            ..container::Style::default()
        }
    })
    .into()
}

fn options_view(form: &MergeForm) -> Column<'_, Message> {
    let mut resize = row![].spacing(8);
    if form.shows_target_width() {
        resize = resize.push(
            text_input("Target width", &form.target_width).on_input(Message::TargetWidthChanged),
        );
    }
    if form.shows_target_height() {
        resize = resize.push(
            text_input("Target height", &form.target_height).on_input(Message::TargetHeightChanged),
        );
    }

    column![
        text("Options").size(18),
        row![
            pick_list(Direction::ALL, Some(form.direction), Message::DirectionSelected),
            pick_list(Alignment::ALL, Some(form.alignment), Message::AlignmentSelected),
            pick_list(OutputFormat::ALL, Some(form.output_format), Message::FormatSelected),
        ]
        .spacing(8),
        row![
            text_input("Spacing", &form.spacing).on_input(Message::SpacingChanged),
            text_input("Quality (1-100)", &form.quality).on_input(Message::QualityChanged),
        ]
        .spacing(8),
        resize,
        row![
            text_input("Border color", &form.border_color).on_input(Message::BorderColorChanged),
            text_input("Border width", &form.border_width).on_input(Message::BorderWidthChanged),
            button("No border").on_press(Message::NoBorder),
        ]
        .spacing(8),
    ]
    .spacing(8)
}

pub fn view<'a>(
    collection: &'a ImageCollection,
    previews: &'a HashMap<ImageId, Handle>,
    form: &'a MergeForm,
    session: &'a MergeSession,
) -> Element<'a, Message> {
    let projection = project(collection);

    let intake = column![
        text("Image Merge").size(32),
        container(text("Drop images or folders anywhere in this window"))
            .padding(24)
            .width(Length::Fill)
            .style(|theme: &iced::Theme| container::Style {
                border: Border {
                    color: theme.extended_palette().background.strong.color,
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..container::Style::default()
            }),
        row![
            button("Add Images").on_press(Message::PickFiles).padding(10),
            button("Add Folder").on_press(Message::PickFolder).padding(10),
        ]
        .spacing(10),
    ]
    .spacing(16);

    let mut content = column![intake].spacing(20);

    if projection.visible {
        let edit = projection.can_edit_selection;
        let toolbar = row![
            text(projection.summary).size(14),
            button(projection.select_all_label).on_press_maybe((!collection.is_empty()).then_some(Message::ToggleSelectAll)),
            button("Move Up").on_press_maybe(edit.then_some(Message::MoveUp)),
            button("Move Down").on_press_maybe(edit.then_some(Message::MoveDown)),
            button("Remove Selected").on_press_maybe(edit.then_some(Message::RemoveSelected)),
        ]
        .spacing(8);

        let tiles = Row::with_children(
            projection
                .tiles
                .into_iter()
                .map(|t| {
                    let preview = previews.get(&t.id);
                    tile(t, preview)
                }),
        )
        .spacing(12)
        .wrap();

        content = content.push(column![toolbar, tiles].spacing(12));
    }

    let merging = session.is_loading();
    let actions = row![
        button(if merging { "Merging..." } else { "Merge" })
            .on_press_maybe((!merging && !collection.is_empty()).then_some(Message::Merge))
            .padding(10),
        button("Reset").on_press(Message::Reset).padding(10),
    ]
    .spacing(10);

    content = content.push(options_view(form)).push(actions);

    if let Some(url) = session.result_url() {
        content = content.push(
            column![
                text("Merged image ready").size(18),
                text(url).size(12).color(Color::from_rgb8(0x64, 0xB5, 0xF6)),
                button("Download").on_press(Message::Download).padding(10),
            ]
            .spacing(8),
        );
    }

    content.into()
}
