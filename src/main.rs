//! Set Builder - GPUI Application
//!
//! A native macOS application for composing a show's ordered set list
//! and saving it to the Set Builder backend.

mod actions;
mod builder;
mod logging;
mod model;
mod services;
mod ui;

use gpui::{
    App, Application, Bounds, KeyBinding, Menu, MenuItem, WindowBounds, WindowHandle,
    WindowOptions, point, prelude::*, px, size,
};

use actions::{AddItem, Quit, SaveShow};
use services::{AppSettings, ServiceBridge, WindowState};
use ui::components::SetList;

/// Build the application menus
fn build_menus() -> Vec<Menu> {
    vec![
        Menu {
            name: "Set Builder".into(),
            items: vec![MenuItem::action("Quit", Quit)],
        },
        Menu {
            name: "Show".into(),
            items: vec![
                MenuItem::action("Add Item...", AddItem),
                MenuItem::separator(),
                MenuItem::action("Save Show", SaveShow),
            ],
        },
    ]
}

fn main() {
    logging::init_logging();

    // An optional slug argument opens an existing show for editing
    let initial_slug = std::env::args().nth(1);

    Application::new().run(move |cx: &mut App| {
        let settings = AppSettings::load();
        let api_base_url = settings.api_base_url.clone();
        cx.set_global(settings);

        // Register action handlers
        cx.on_action(|_: &Quit, cx| cx.quit());

        // Note: AddItem and SaveShow handlers are registered on the SetList
        // view itself via on_action in render(). The view has focus, so it
        // receives the actions dispatched from menu items.

        // Bind keyboard shortcuts
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-n", AddItem, None),
            KeyBinding::new("cmd-s", SaveShow, None),
        ]);

        cx.set_menus(build_menus());

        // Restore window position and size from the last session
        let window_state = WindowState::load();
        let bounds = Bounds {
            origin: point(px(window_state.x as f32), px(window_state.y as f32)),
            size: size(
                px(window_state.width as f32),
                px(window_state.height as f32),
            ),
        };

        let window_handle: WindowHandle<SetList> = match cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                window_min_size: Some(size(px(560.), px(400.))),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Set Builder".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_window, cx| {
                cx.new(|cx| {
                    let mut set_list = SetList::new(cx);
                    match ServiceBridge::start(&api_base_url) {
                        Ok(bridge) => {
                            set_list.connect(bridge, initial_slug.clone());
                            SetList::start_event_polling(cx);
                        }
                        Err(e) => {
                            log::error!("Could not start background services: {}", e);
                        }
                    }
                    set_list
                })
            },
        ) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Could not open the main window: {}", e);
                cx.quit();
                return;
            }
        };

        // Quit the app when the main window is closed
        // This is appropriate for a single-window utility app
        cx.on_window_closed(|cx| {
            cx.quit();
        })
        .detach();

        let _ = window_handle;

        cx.activate(true);
    });
}
