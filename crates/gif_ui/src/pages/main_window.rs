//! Main window view.
//!
//! Input file, range and encoding fields, the action buttons, the preview
//! canvas and the status log, top to bottom.

use iced::widget::{button, column, container, image, radio, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use gif_core::models::ExportMethod;

use crate::app::{App, Message};
use crate::theme::{colors, font, log_line_color, preview, spacing};

/// Build the main window view.
pub fn view(app: &App) -> Element<'_, Message> {
    let content = column![
        input_row(app),
        duration_row(app),
        times_row(app),
        options_row(app),
        method_row(app),
        buttons_row(app),
        output_row(app),
        preview_canvas(app),
        log_section(app),
    ]
    .spacing(spacing::SM)
    .padding(spacing::MD);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn label(content: &str) -> iced::widget::Text<'_> {
    text(content).size(font::NORMAL)
}

fn input_row(app: &App) -> Element<'_, Message> {
    let file = match app.input_path {
        Some(ref path) => path.display().to_string(),
        None => "(no file selected)".to_string(),
    };

    row![
        label("Video:"),
        text(file).size(font::NORMAL).width(Length::Fill),
        button(label("Open...")).on_press_maybe((!app.is_exporting()).then_some(Message::OpenInput)),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

fn duration_row(app: &App) -> Element<'_, Message> {
    row![label("Duration:"), text(app.duration_label()).size(font::NORMAL)]
        .spacing(spacing::SM)
        .into()
}

fn times_row(app: &App) -> Element<'_, Message> {
    row![
        label("Start (s or HH:MM:SS):"),
        text_input("0", &app.form.start)
            .on_input(Message::StartChanged)
            .width(Length::Fixed(140.0)),
        label("End (s or HH:MM:SS):"),
        text_input("duration", &app.form.end)
            .on_input(Message::EndChanged)
            .width(Length::Fixed(140.0)),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

fn options_row(app: &App) -> Element<'_, Message> {
    row![
        label("FPS:"),
        text_input("10", &app.form.fps)
            .on_input(Message::FpsChanged)
            .width(Length::Fixed(60.0)),
        label("Width (px, optional):"),
        text_input("source", &app.form.width)
            .on_input(Message::WidthChanged)
            .width(Length::Fixed(80.0)),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

fn method_row(app: &App) -> Element<'_, Message> {
    let mut methods = row![label("Method:")]
        .spacing(spacing::MD)
        .align_y(Alignment::Center);

    for method in ExportMethod::ALL {
        methods = methods.push(
            radio(
                method.label(),
                method,
                Some(app.form.method),
                Message::MethodSelected,
            )
            .size(14.0)
            .text_size(font::NORMAL),
        );
    }

    methods.into()
}

fn buttons_row(app: &App) -> Element<'_, Message> {
    let idle = !app.is_exporting();

    let export_label = if idle { "Export GIF" } else { "Exporting..." };

    row![
        button(label("Preview Frame"))
            .on_press_maybe((!app.is_previewing).then_some(Message::PreviewFrame)),
        button(label(export_label)).on_press_maybe(idle.then_some(Message::Export)),
        button(label("Choose Output...")).on_press_maybe(idle.then_some(Message::ChooseOutput)),
    ]
    .spacing(spacing::SM)
    .into()
}

fn output_row(app: &App) -> Element<'_, Message> {
    row![
        label("Output:"),
        text_input("", &app.form.output)
            .on_input(Message::OutputChanged)
            .width(Length::Fill),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

fn preview_canvas(app: &App) -> Element<'_, Message> {
    let inner: Element<'_, Message> = match app.preview {
        Some(ref handle) => image(handle.clone()).into(),
        None => text("Preview")
            .size(font::NORMAL)
            .color(colors::TEXT_ON_DARK)
            .into(),
    };

    container(inner)
        .center_x(Length::Fixed(preview::WIDTH as f32))
        .center_y(Length::Fixed(preview::HEIGHT as f32))
        .style(|_theme| container::Style {
            background: Some(colors::PREVIEW_BG.into()),
            ..container::Style::default()
        })
        .into()
}

fn log_section(app: &App) -> Element<'_, Message> {
    let lines = app.log_lines.iter().map(|line| {
        let mut t = text(line.as_str()).size(font::SM);
        if let Some(color) = log_line_color(line) {
            t = t.color(color);
        }
        t.into()
    });

    let log = scrollable(column(lines).spacing(2.0).padding(spacing::XS).width(Length::Fill))
        .anchor_bottom()
        .height(Length::Fill)
        .width(Length::Fill);

    column![
        text("Status:").size(font::NORMAL).color(colors::TEXT_SECONDARY),
        container(log)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(colors::LOG_BG.into()),
                border: iced::Border {
                    color: colors::BORDER,
                    width: 1.0,
                    radius: 2.0.into(),
                },
                ..container::Style::default()
            }),
    ]
    .spacing(spacing::XS)
    .height(Length::Fill)
    .into()
}
