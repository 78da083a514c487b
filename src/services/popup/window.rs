use super::content::{InfoRow, PopupContent};
use super::lifecycle::{Dismissal, PopupLifecycle};
use crate::config::PopupConfig;
use gtk4::prelude::*;
use gtk4::{
    gdk, gio, glib, pango, Align, Application, ApplicationWindow, Button, EventControllerKey,
    Label, Orientation, PolicyType, ScrolledWindow, Separator,
};
use std::rc::Rc;

const APP_ID: &str = "com.filestats.popup";
const LABEL_WIDTH: i32 = 120;

/// Запускает GTK-приложение с одним окном и возвращается после его закрытия
pub fn run(content: PopupContent, settings: PopupConfig) -> glib::ExitCode {
    // Каждый запуск показывает свой файл, поэтому без единственного экземпляра
    let app = Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| build_window(app, &content, &settings));

    // Аргументы уже разобраны clap
    app.run_with_args::<&str>(&[])
}

fn build_window(app: &Application, content: &PopupContent, settings: &PopupConfig) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("File Information")
        .default_width(settings.width)
        .default_height(settings.height)
        .resizable(false)
        .decorated(true)
        .modal(true)
        .build();

    let main_box = gtk4::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(10)
        .margin_top(15)
        .margin_bottom(15)
        .margin_start(15)
        .margin_end(15)
        .build();

    let title_label = Label::new(None);
    title_label.set_markup(&format!(
        "<span size='large' weight='bold'>{}</span>",
        glib::markup_escape_text(&content.heading)
    ));
    title_label.set_halign(Align::Start);
    main_box.append(&title_label);
    main_box.append(&Separator::new(Orientation::Horizontal));

    let content_box = gtk4::Box::new(Orientation::Vertical, 8);
    fill_details(&content_box, content);

    let scrolled = ScrolledWindow::builder()
        .hscrollbar_policy(PolicyType::Never)
        .vscrollbar_policy(PolicyType::Automatic)
        .min_content_height(200)
        .child(&content_box)
        .build();
    main_box.append(&scrolled);

    let close_button = Button::with_label("Close");
    close_button.add_css_class("suggested-action");
    let button_box = gtk4::Box::new(Orientation::Horizontal, 0);
    button_box.set_halign(Align::End);
    button_box.append(&close_button);
    main_box.append(&button_box);

    window.set_child(Some(&main_box));

    let lifecycle = PopupLifecycle::new();
    let dismiss: Rc<dyn Fn(Dismissal)> = {
        let window = window.clone();
        let app = app.clone();
        Rc::new(move |reason| {
            if !lifecycle.dismiss(reason) {
                return;
            }
            // На close-request окно закрывается само
            if reason != Dismissal::WindowClosed {
                window.close();
            }
            app.quit();
        })
    };

    let on_click = dismiss.clone();
    close_button.connect_clicked(move |_| on_click(Dismissal::CloseButton));

    let on_close = dismiss.clone();
    window.connect_close_request(move |_| {
        on_close(Dismissal::WindowClosed);
        glib::Propagation::Proceed
    });

    let on_key = dismiss.clone();
    let key_controller = EventControllerKey::new();
    key_controller.connect_key_pressed(move |_, keyval, _, _| {
        if keyval == gdk::Key::Escape {
            on_key(Dismissal::Escape);
            glib::Propagation::Stop
        } else {
            glib::Propagation::Proceed
        }
    });
    window.add_controller(key_controller);

    window.present();

    // Одноразовый таймер; если окно закрыли раньше, он просто ничего не сделает
    glib::timeout_add_seconds_local_once(settings.auto_close_secs, move || {
        dismiss(Dismissal::Timeout)
    });
}

fn fill_details(container: &gtk4::Box, content: &PopupContent) {
    if let Some(error) = &content.error {
        let error_label = Label::new(None);
        error_label.set_markup(&format!(
            "<span color='red'>Error: {}</span>",
            glib::markup_escape_text(error)
        ));
        error_label.set_halign(Align::Start);
        error_label.set_wrap(true);
        container.append(&error_label);
    }

    for row in &content.rows {
        add_info_row(container, row);
    }

    if !content.exif.is_empty() {
        container.append(&Separator::new(Orientation::Horizontal));

        let exif_label = Label::new(None);
        exif_label.set_markup("<span weight='bold'>EXIF Data</span>");
        exif_label.set_halign(Align::Start);
        container.append(&exif_label);

        for row in &content.exif {
            add_info_row(container, row);
        }
    }

    if let Some(path) = &content.path {
        add_info_row(container, path);
    }
}

fn add_info_row(container: &gtk4::Box, row: &InfoRow) {
    let row_box = gtk4::Box::new(Orientation::Horizontal, 10);

    let label_widget = Label::new(Some(&format!("{}:", row.label)));
    label_widget.set_halign(Align::Start);
    label_widget.set_xalign(0.0);
    label_widget.set_size_request(LABEL_WIDTH, -1);
    label_widget.add_css_class("caption");
    row_box.append(&label_widget);

    let value_widget = Label::new(Some(&row.value));
    value_widget.set_halign(Align::Start);
    value_widget.set_xalign(0.0);
    value_widget.set_selectable(true);
    value_widget.set_wrap(true);
    value_widget.set_wrap_mode(pango::WrapMode::WordChar);
    if row.monospace {
        value_widget.add_css_class("monospace");
    }
    row_box.append(&value_widget);

    container.append(&row_box);
}
