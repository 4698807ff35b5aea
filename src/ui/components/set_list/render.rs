//! Rendering implementation for SetList
//!
//! Contains the Render trait implementation, the drag payload for row
//! reordering, and all rendering helper methods.

use gpui::{
    Context, Half, IntoElement, KeyDownEvent, Pixels, Point, PromptLevel, Render, SharedString,
    Window, div, prelude::*, px, rgb,
};
use std::sync::mpsc;

use crate::actions::{AddItem, SaveShow};
use crate::model::{ItemKind, SetItem, Vibe, format_duration};
use crate::services::WindowState;
use crate::ui::Theme;
use crate::ui::components::ItemBuilderWindow;
use crate::ui::components::status_bar::{StatusBarProps, render_status_bar};

use super::SetList;

/// Data carried during a drag operation for row reordering
#[derive(Clone)]
pub struct DraggedRow {
    /// Index of the row being dragged
    pub index: usize,
    /// Row display name
    pub name: String,
    /// Current drag position
    position: Point<Pixels>,
    /// Source window title (to avoid rendering in wrong windows)
    source_window_title: String,
}

impl DraggedRow {
    pub fn new(index: usize, name: String, window_title: String) -> Self {
        Self {
            index,
            name,
            position: Point::default(),
            source_window_title: window_title,
        }
    }

    pub fn with_position(mut self, pos: Point<Pixels>) -> Self {
        self.position = pos;
        self
    }
}

impl Render for DraggedRow {
    fn render(&mut self, window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        // Only render in the window that matches our source window title
        if window.window_title() != self.source_window_title {
            return div().into_any_element();
        }

        let theme = Theme::from_appearance(window.appearance());
        let viewport = window.viewport_size();
        let width = viewport.width - px(48.);
        let height = px(40.);

        div()
            .pl(self.position.x - width.half())
            .pt(self.position.y - height.half())
            .child(
                div()
                    .w(width)
                    .h(height)
                    .flex()
                    .items_center()
                    .px_3()
                    .bg(theme.bg_card)
                    .border_1()
                    .border_color(theme.accent)
                    .rounded_md()
                    .shadow_lg()
                    .opacity(0.95)
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.text)
                            .overflow_hidden()
                            .text_ellipsis()
                            .child(self.name.clone()),
                    ),
            )
            .into_any_element()
    }
}

impl SetList {
    /// Open the modal Item Builder window (one at a time)
    pub(crate) fn open_item_builder(&mut self, cx: &mut Context<Self>) {
        if self.builder_update_rx.is_some() {
            return;
        }
        let (roster, bridge) = match (self.roster.clone(), self.bridge.clone()) {
            (Some(roster), Some(bridge)) => (roster, bridge),
            _ => return,
        };

        let (update_tx, update_rx) = mpsc::channel();
        self.builder_update_rx = Some(update_rx);
        ItemBuilderWindow::open(cx, roster, bridge, update_tx);
    }

    /// Handle key presses for inline label editing
    fn handle_key(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) -> bool {
        if !self.editing_label {
            return false;
        }
        let keystroke = &event.keystroke;

        if keystroke.key == "escape" || keystroke.key == "enter" {
            self.editing_label = false;
            cx.notify();
            return true;
        }
        if keystroke.key == "backspace" {
            self.show.pop_label_char();
            cx.notify();
            return true;
        }
        if let Some(ref key_char) = keystroke.key_char {
            for c in key_char.chars() {
                if !c.is_control() {
                    self.show.push_label_char(c);
                }
            }
            cx.notify();
            return true;
        }

        false
    }

    /// Render the empty state
    fn render_empty_state(&self, theme: &Theme) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap_2()
            .text_color(theme.text_muted)
            .child(div().text_2xl().child("🎤"))
            .child(div().text_lg().child("No items yet"))
            .child(div().text_sm().child("Click Add Item to build the set"))
    }

    /// Badge color per item kind
    fn kind_color(kind: ItemKind, theme: &Theme) -> gpui::Hsla {
        match kind {
            ItemKind::Opener => theme.accent,
            ItemKind::Headliner => theme.success,
            ItemKind::Collab => rgb(0xa855f7).into(),
            ItemKind::Break | ItemKind::Intermission => theme.text_muted,
            ItemKind::Talking => theme.warning,
        }
    }

    /// Render a single set list row
    fn render_row(
        &self,
        index: usize,
        item: &SetItem,
        theme: &Theme,
        window_title: &str,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let kind = item.kind();
        let name = item.display_name().to_string();
        let song = item.song_label().to_string();
        let duration = format_duration(item.duration_seconds());

        let drag_info = DraggedRow::new(index, name.clone(), window_title.to_string());

        div()
            .id(SharedString::from(format!("row-{}", index)))
            .w_full()
            .h_10()
            .flex()
            .items_center()
            .gap_2()
            .px_3()
            .bg(theme.bg_card)
            .border_1()
            .border_color(theme.border)
            .rounded_md()
            .cursor_grab()
            .hover(|s| s.bg(theme.bg_card_hover))
            // Make draggable for reordering
            .on_drag(drag_info, |info: &DraggedRow, position, _, cx| {
                cx.new(|_| info.clone().with_position(position))
            })
            // Dropping on a row moves the dragged row to this position
            .on_drop(cx.listener(move |this, dragged: &DraggedRow, _window, cx| {
                this.move_row(dragged.index, index);
                cx.notify();
            }))
            .drag_over::<DraggedRow>(|style, _, _, _| style.bg(rgb(0x3d3d3d)))
            // Position number
            .child(
                div()
                    .w_6()
                    .text_xs()
                    .text_color(theme.text_muted)
                    .text_center()
                    .child(format!("{}", index + 1)),
            )
            // Kind badge
            .child(
                div()
                    .px_2()
                    .py_px()
                    .text_xs()
                    .rounded_sm()
                    .bg(Self::kind_color(kind, theme).opacity(0.2))
                    .text_color(Self::kind_color(kind, theme))
                    .child(kind.label()),
            )
            // Display name
            .child(
                div()
                    .flex_1()
                    .text_sm()
                    .text_color(theme.text)
                    .overflow_hidden()
                    .text_ellipsis()
                    .child(name),
            )
            // Song / segment label
            .child(
                div()
                    .text_xs()
                    .text_color(theme.text_muted)
                    .overflow_hidden()
                    .text_ellipsis()
                    .child(song),
            )
            // Duration
            .child(
                div()
                    .w_12()
                    .text_xs()
                    .text_color(theme.text_muted)
                    .text_right()
                    .child(duration),
            )
            // Remove button
            .child(
                div()
                    .id(SharedString::from(format!("remove-{}", index)))
                    .px_2()
                    .py_1()
                    .text_color(theme.text_muted)
                    .cursor_pointer()
                    .hover(|s| s.text_color(theme.danger))
                    .on_click(cx.listener(move |this, _, _window, cx| {
                        this.remove_row(index);
                        cx.notify();
                    }))
                    .child("✕"),
            )
    }

    /// Render the show header: editable label plus vibe selector
    fn render_show_header(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let label = self.show.label().to_string();
        let editing = self.editing_label;
        let vibe = self.show.vibe();

        let label_el = if editing {
            div()
                .flex_1()
                .h_8()
                .px_3()
                .flex()
                .items_center()
                .bg(theme.bg_card)
                .border_1()
                .border_color(theme.accent)
                .rounded_md()
                .child(
                    div()
                        .text_base()
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .text_color(theme.text)
                        .child(if label.is_empty() {
                            " ".to_string()
                        } else {
                            label.clone()
                        }),
                )
                .child(div().w(px(2.)).h(px(16.)).bg(theme.accent).ml_px())
                .into_any_element()
        } else {
            div()
                .id(SharedString::from("label-display"))
                .flex_1()
                .text_lg()
                .font_weight(gpui::FontWeight::SEMIBOLD)
                .text_color(if label.is_empty() {
                    theme.text_muted
                } else {
                    theme.text
                })
                .cursor_pointer()
                .hover(|s| s.text_color(theme.accent))
                .on_click(cx.listener(|this, _, _window, cx| {
                    this.editing_label = true;
                    cx.notify();
                }))
                .child(if label.is_empty() {
                    "Untitled show".to_string()
                } else {
                    label.clone()
                })
                .into_any_element()
        };

        let mut vibe_row = div().flex().gap_1();
        for candidate in Vibe::ALL {
            let selected = candidate == vibe;
            vibe_row = vibe_row.child(
                div()
                    .id(SharedString::from(format!("vibe-{}", candidate.as_wire())))
                    .px_3()
                    .py_1()
                    .text_xs()
                    .rounded_md()
                    .border_1()
                    .border_color(if selected { theme.accent } else { theme.border })
                    .bg(if selected {
                        theme.accent.opacity(0.2)
                    } else {
                        theme.bg_card
                    })
                    .text_color(if selected { theme.accent } else { theme.text })
                    .cursor_pointer()
                    .hover(|s| s.bg(theme.bg_card_hover))
                    .on_click(cx.listener(move |this, _, _window, cx| {
                        this.show.set_vibe(candidate);
                        cx.notify();
                    }))
                    .child(candidate.label()),
            );
        }

        div()
            .w_full()
            .px_6()
            .py_3()
            .flex()
            .items_center()
            .gap_3()
            .border_b_1()
            .border_color(theme.border)
            .child(label_el)
            .child(vibe_row)
    }

    /// Show any pending error dialog
    fn show_pending_error_dialog(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if let Some((title, message)) = self.pending_error_message.take() {
            let _future = window.prompt(PromptLevel::Warning, &title, Some(&message), &["OK"], cx);
        }
    }
}

impl Render for SetList {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Subscribe to appearance changes (once)
        if !self.appearance_subscription_set {
            self.appearance_subscription_set = true;
            cx.observe_window_appearance(window, |_this, _window, cx| {
                cx.notify();
            })
            .detach();
        }

        // Subscribe to bounds changes to save window state (once)
        if !self.bounds_subscription_set {
            self.bounds_subscription_set = true;
            cx.observe_window_bounds(window, |_this, window, _cx| {
                let bounds = window.bounds();
                let state = WindowState {
                    x: bounds.origin.x.into(),
                    y: bounds.origin.y.into(),
                    width: bounds.size.width.into(),
                    height: bounds.size.height.into(),
                };
                if let Err(e) = state.save() {
                    log::warn!("Failed to save window state: {}", e);
                }
            })
            .detach();
        }

        // Grab initial focus so menu items work immediately
        if self.needs_initial_focus {
            self.needs_initial_focus = false;
            if let Some(ref focus_handle) = self.focus_handle {
                focus_handle.focus(window);
            }
        }

        // Show any pending dialogs
        self.show_pending_error_dialog(window, cx);

        // Window title reflects the show label
        let title = if self.show.label().is_empty() {
            "Set Builder".to_string()
        } else {
            format!("Set Builder - {}", self.show.label())
        };
        window.set_window_title(&title);
        let window_title = window.window_title();

        let theme = Theme::from_appearance(window.appearance());
        let is_empty = self.show.is_empty();

        // Build the list content
        let list_content = if is_empty {
            self.render_empty_state(&theme).into_any_element()
        } else {
            let items: Vec<SetItem> = self.show.items().to_vec();
            let mut list = div().w_full().flex().flex_col().gap_2();
            for (index, item) in items.iter().enumerate() {
                list = list.child(self.render_row(index, item, &theme, &window_title, cx));
            }
            list.into_any_element()
        };

        // Action handlers
        let on_save = cx.listener(|this, _: &SaveShow, _window, cx| {
            this.request_save();
            cx.notify();
        });
        let on_add = cx.listener(|this, _: &AddItem, _window, cx| {
            this.open_item_builder(cx);
            cx.notify();
        });

        // Dropping past the last row moves the dragged row to the end
        let on_list_drop = cx.listener(|this, dragged: &DraggedRow, _window, cx| {
            let end = this.show.len().saturating_sub(1);
            this.move_row(dragged.index, end);
            cx.notify();
        });

        let add_enabled = self.roster.is_some() && self.builder_update_rx.is_none();
        let status_bar = render_status_bar(
            StatusBarProps {
                item_count: self.show.len(),
                total_label: format_duration(self.show.total_duration_seconds()),
                dirty: self.show.is_dirty(),
                add_enabled,
                save_enabled: self.can_save(),
                save_in_flight: self.save_in_flight,
                theme,
            },
            cx,
            |view, _window, cx| {
                view.open_item_builder(cx);
                cx.notify();
            },
            |view, _window, cx| {
                view.request_save();
                cx.notify();
            },
        );

        let mut container = div().size_full().flex().flex_col().bg(theme.bg);

        // Track focus if we have a focus handle (not in tests)
        if let Some(ref focus_handle) = self.focus_handle {
            container = container.track_focus(focus_handle);
        }

        container
            .key_context("SetList")
            .on_key_down(cx.listener(|this, event: &KeyDownEvent, _window, cx| {
                this.handle_key(event, cx);
            }))
            .on_action(on_save)
            .on_action(on_add)
            .child(self.render_show_header(&theme, cx))
            // Roster load failure notice
            .when_some(self.roster_error.clone(), |el, error| {
                el.child(
                    div()
                        .w_full()
                        .px_6()
                        .py_2()
                        .text_sm()
                        .text_color(theme.danger)
                        .child(format!("Could not load the artist roster: {}", error)),
                )
            })
            // Main content area: the set list (scrollable)
            .child(
                div()
                    .id("set-list-scroll")
                    .flex_1()
                    .w_full()
                    .overflow_scroll()
                    .track_scroll(&self.scroll_handle)
                    .px_6()
                    .py_2()
                    .on_drop(on_list_drop)
                    .drag_over::<DraggedRow>(|style, _, _, _| style.bg(rgb(0x3d3d3d)))
                    .child(list_content),
            )
            // Status bar at bottom
            .child(status_bar)
    }
}
