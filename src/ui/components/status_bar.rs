//! StatusBar component - Bottom bar with set totals and action buttons

use gpui::{Context, IntoElement, SharedString, div, prelude::*};

use crate::ui::Theme;

/// Properties for the status bar
pub struct StatusBarProps {
    pub item_count: usize,
    /// Total running time, already formatted as m:ss
    pub total_label: String,
    pub dirty: bool,
    /// Whether the Add Item button is clickable (roster loaded)
    pub add_enabled: bool,
    /// Whether the Save button is clickable
    pub save_enabled: bool,
    pub save_in_flight: bool,
    pub theme: Theme,
}

/// Render the status bar
///
/// Totals and the dirty indicator on the left, Add Item and Save on the
/// right.
pub fn render_status_bar<V, A, S>(
    props: StatusBarProps,
    cx: &mut Context<V>,
    on_add_click: A,
    on_save_click: S,
) -> impl IntoElement + use<V, A, S>
where
    V: 'static,
    A: Fn(&mut V, &mut gpui::Window, &mut Context<V>) + 'static,
    S: Fn(&mut V, &mut gpui::Window, &mut Context<V>) + 'static,
{
    let StatusBarProps {
        item_count,
        total_label,
        dirty,
        add_enabled,
        save_enabled,
        save_in_flight,
        theme,
    } = props;

    let item_text = if item_count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", item_count)
    };

    let save_label = if save_in_flight { "Saving..." } else { "Save" };

    div()
        .py_3()
        .px_6()
        .flex()
        .items_center()
        .justify_between()
        .bg(theme.bg)
        .border_t_1()
        .border_color(theme.border)
        .text_sm()
        // Left side: totals and dirty indicator
        .child(
            div()
                .flex()
                .items_center()
                .gap_4()
                .text_color(theme.text_muted)
                .child(item_text)
                .child(
                    div().flex().gap_1().child("Total:").child(
                        div()
                            .text_color(theme.text)
                            .font_weight(gpui::FontWeight::BOLD)
                            .child(total_label),
                    ),
                )
                .when(dirty, |el| {
                    el.child(div().text_color(theme.warning).child("Unsaved changes"))
                }),
        )
        // Right side: action buttons
        .child(
            div()
                .flex()
                .gap_2()
                .child(
                    div()
                        .id(SharedString::from("add-item-btn"))
                        .px_4()
                        .py_2()
                        .bg(if add_enabled {
                            theme.accent
                        } else {
                            theme.bg_card
                        })
                        .text_color(if add_enabled {
                            gpui::white()
                        } else {
                            theme.text_muted
                        })
                        .rounded_md()
                        .when(add_enabled, |el| {
                            el.cursor_pointer().hover(|s| s.bg(theme.success))
                        })
                        .on_click(cx.listener(move |view, _event, window, cx| {
                            if add_enabled {
                                on_add_click(view, window, cx);
                            }
                        }))
                        .child("Add Item"),
                )
                .child(
                    div()
                        .id(SharedString::from("save-btn"))
                        .px_4()
                        .py_2()
                        .bg(if save_enabled {
                            theme.success
                        } else {
                            theme.bg_card
                        })
                        .text_color(if save_enabled {
                            gpui::white()
                        } else {
                            theme.text_muted
                        })
                        .rounded_md()
                        .when(save_enabled, |el| {
                            el.cursor_pointer().hover(|s| s.bg(theme.success_hover))
                        })
                        .on_click(cx.listener(move |view, _event, window, cx| {
                            if save_enabled {
                                on_save_click(view, window, cx);
                            }
                        }))
                        .child(save_label),
                ),
        )
}
