//! Item Builder window
//!
//! A modal editor for composing one set item. The kind selector switches
//! between per-kind forms without losing entered state; artist picks
//! dispatch song lookups through the service bridge and the finished item
//! is handed back to the set list over a channel.

use gpui::{
    Bounds, Context, FocusHandle, IntoElement, KeyDownEvent, Render, SharedString, Window,
    WindowBounds, WindowOptions, div, prelude::*, px, size,
};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use gpui::{AsyncApp, Timer, WeakEntity};

use crate::builder::{ChooserState, ItemDraft, SongChooser};
use crate::model::{ALL_KINDS, ItemKind, SetItem};
use crate::services::{Artist, LookupTarget, Roster, ServiceBridge, ServiceEvent};
use crate::ui::Theme;

/// Updates sent from the builder back to the SetList
#[derive(Debug)]
pub enum BuilderUpdate {
    /// A finished item to append to the set
    ItemAdded(SetItem),
    /// Builder window closed
    Closed,
}

/// The Item Builder window
pub struct ItemBuilderWindow {
    /// Draft state for every kind
    draft: ItemDraft,
    /// Artist roster the pick lists are built from
    roster: Roster,
    /// Handle to the background service thread
    bridge: ServiceBridge,
    /// Channel to send updates to the SetList
    update_tx: mpsc::Sender<BuilderUpdate>,
    /// Reply channel for song lookups this window dispatches
    event_tx: Sender<ServiceEvent>,
    event_rx: Receiver<ServiceEvent>,
    /// Focus handle for keyboard input
    focus_handle: FocusHandle,
}

impl ItemBuilderWindow {
    fn new(
        cx: &mut Context<Self>,
        roster: Roster,
        bridge: ServiceBridge,
        update_tx: mpsc::Sender<BuilderUpdate>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            draft: ItemDraft::new(),
            roster,
            bridge,
            update_tx,
            event_tx,
            event_rx,
            focus_handle: cx.focus_handle(),
        }
    }

    /// Open the Item Builder window
    pub fn open(
        cx: &mut gpui::App,
        roster: Roster,
        bridge: ServiceBridge,
        update_tx: mpsc::Sender<BuilderUpdate>,
    ) -> Option<gpui::WindowHandle<Self>> {
        let bounds = Bounds::centered(None, size(px(520.), px(620.)), cx);

        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                window_min_size: Some(size(px(420.), px(420.))),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Add Item".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_window, cx| {
                cx.new(|cx| {
                    let builder = ItemBuilderWindow::new(cx, roster, bridge, update_tx);
                    Self::start_event_polling(cx);
                    builder
                })
            },
        )
        .ok()
    }

    /// Drain song lookup replies into the draft's choosers
    fn poll_service_events(&mut self) -> bool {
        let mut events_processed = false;

        while let Ok(event) = self.event_rx.try_recv() {
            if let ServiceEvent::SongsLoaded {
                target,
                generation,
                songs,
            } = event
            {
                events_processed = true;
                let applied = match target {
                    LookupTarget::Headliner => self.draft.apply_headliner_songs(generation, songs),
                    LookupTarget::Collab => self.draft.apply_collab_songs(generation, songs),
                };
                if !applied {
                    log::debug!("Stale {:?} lookup discarded", target);
                }
            }
        }

        events_processed
    }

    /// Start a polling loop for song lookup replies
    ///
    /// The loop exits once the window entity has been dropped.
    fn start_event_polling(cx: &mut Context<Self>) {
        cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                loop {
                    Timer::after(Duration::from_millis(100)).await;

                    let alive = this
                        .update(&mut async_cx, |this, cx| {
                            if this.poll_service_events() {
                                cx.notify();
                            }
                            true
                        })
                        .unwrap_or(false);

                    if !alive {
                        break;
                    }
                }
            }
        })
        .detach();
    }

    fn pick_headliner_artist(&mut self, artist: Option<Artist>) {
        let id = artist.as_ref().map(|a| a.id.clone());
        if let Some(generation) = self.draft.select_headliner_artist(artist) {
            if let Some(id) = id {
                self.bridge
                    .fetch_songs(LookupTarget::Headliner, id, generation, self.event_tx.clone());
            }
        }
    }

    fn toggle_collab_artist(&mut self, artist: Artist) {
        if let Some((generation, ids)) = self.draft.toggle_collab_artist(artist) {
            self.bridge
                .fetch_songs_union(LookupTarget::Collab, ids, generation, self.event_tx.clone());
        }
    }

    /// Build the finished item and hand it to the set list
    fn add_and_close(&self, window: &mut Window, _cx: &mut Context<Self>) {
        let item = match self.draft.build() {
            Some(item) => item,
            // Incomplete draft: the button is disabled, the enter key lands here
            None => return,
        };
        let _ = self.update_tx.send(BuilderUpdate::ItemAdded(item));
        let _ = self.update_tx.send(BuilderUpdate::Closed);
        window.remove_window();
    }

    /// Close without adding anything
    fn cancel(&self, window: &mut Window, _cx: &mut Context<Self>) {
        let _ = self.update_tx.send(BuilderUpdate::Closed);
        window.remove_window();
    }

    /// Handle key presses: escape cancels, enter adds, digits edit minutes
    fn handle_key(&mut self, event: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;

        if keystroke.key == "escape" {
            self.cancel(window, cx);
            return;
        }
        if keystroke.key == "enter" {
            self.add_and_close(window, cx);
            return;
        }

        // Typed digits edit the active kind's minutes field
        if self.draft.active_minutes().is_some() {
            if keystroke.key == "backspace" {
                if let Some(current) = self.draft.active_minutes() {
                    self.draft.set_active_minutes(current / 10);
                    cx.notify();
                }
                return;
            }
            if let Some(ref key_char) = keystroke.key_char {
                for c in key_char.chars() {
                    if let Some(digit) = c.to_digit(10) {
                        if let Some(current) = self.draft.active_minutes() {
                            self.draft.set_active_minutes(current * 10 + digit);
                        }
                    }
                }
                cx.notify();
            }
        }
    }

    /// Artists offered for the active kind
    fn artists_for_kind(&self, kind: ItemKind) -> Vec<Artist> {
        match kind {
            ItemKind::Opener => self.roster.openers.clone(),
            ItemKind::Headliner | ItemKind::Collab => self.roster.headliners.clone(),
            ItemKind::Talking => {
                let mut all = self.roster.headliners.clone();
                all.extend(self.roster.openers.clone());
                all
            }
            ItemKind::Break | ItemKind::Intermission => Vec::new(),
        }
    }

    /// Whether an artist is currently picked for the active kind
    fn artist_is_picked(&self, kind: ItemKind, artist: &Artist) -> bool {
        match kind {
            ItemKind::Opener => self.draft.opener_artist().map(|a| &a.id) == Some(&artist.id),
            ItemKind::Headliner => self.draft.headliner_artist().map(|a| &a.id) == Some(&artist.id),
            ItemKind::Collab => self.draft.has_collab_artist(&artist.id),
            ItemKind::Talking => self.draft.talking_artist().map(|a| &a.id) == Some(&artist.id),
            ItemKind::Break | ItemKind::Intermission => false,
        }
    }

    fn on_artist_click(&mut self, kind: ItemKind, artist: Artist, cx: &mut Context<Self>) {
        match kind {
            ItemKind::Opener => {
                let next = if self.artist_is_picked(kind, &artist) {
                    None
                } else {
                    Some(artist)
                };
                self.draft.set_opener_artist(next);
            }
            ItemKind::Headliner => {
                let next = if self.artist_is_picked(kind, &artist) {
                    None
                } else {
                    Some(artist)
                };
                self.pick_headliner_artist(next);
            }
            ItemKind::Collab => self.toggle_collab_artist(artist),
            ItemKind::Talking => {
                let next = if self.artist_is_picked(kind, &artist) {
                    None
                } else {
                    Some(artist)
                };
                self.draft.set_talking_artist(next);
            }
            ItemKind::Break | ItemKind::Intermission => {}
        }
        cx.notify();
    }

    /// Render the kind selector row
    fn render_kind_selector(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let active = self.draft.kind();
        let mut row = div().flex().flex_wrap().gap_1();
        for kind in ALL_KINDS {
            let selected = kind == active;
            row = row.child(
                div()
                    .id(SharedString::from(format!("kind-{}", kind.as_wire())))
                    .px_3()
                    .py_1()
                    .text_sm()
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
                        this.draft.set_kind(kind);
                        cx.notify();
                    }))
                    .child(kind.label()),
            );
        }
        row
    }

    /// Render the artist pick list for the active kind
    fn render_artist_list(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let kind = self.draft.kind();
        let artists = self.artists_for_kind(kind);

        let heading = match kind {
            ItemKind::Collab => "Artists (pick at least two)",
            _ => "Artist",
        };

        let mut list = div().flex().flex_col().gap_1();
        if artists.is_empty() {
            list = list.child(
                div()
                    .text_sm()
                    .text_color(theme.text_muted)
                    .child("No artists available"),
            );
        }
        for artist in artists {
            let picked = self.artist_is_picked(kind, &artist);
            let artist_for_click = artist.clone();
            list = list.child(
                div()
                    .id(SharedString::from(format!("artist-{}", artist.id)))
                    .px_3()
                    .py_1()
                    .flex()
                    .items_center()
                    .justify_between()
                    .text_sm()
                    .rounded_md()
                    .border_1()
                    .border_color(if picked { theme.accent } else { theme.border })
                    .bg(if picked {
                        theme.accent.opacity(0.2)
                    } else {
                        theme.bg_card
                    })
                    .text_color(theme.text)
                    .cursor_pointer()
                    .hover(|s| s.bg(theme.bg_card_hover))
                    .on_click(cx.listener(move |this, _, _window, cx| {
                        this.on_artist_click(kind, artist_for_click.clone(), cx);
                    }))
                    .child(artist.name.clone())
                    .when(picked, |el| {
                        el.child(div().text_color(theme.accent).child("✓"))
                    }),
            );
        }

        div()
            .flex()
            .flex_col()
            .gap_2()
            .child(
                div()
                    .text_xs()
                    .text_color(theme.text_muted)
                    .child(heading),
            )
            .child(list)
    }

    /// Render the song chooser for the active kind
    fn render_song_chooser(
        &self,
        chooser: &SongChooser,
        theme: &Theme,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let kind = self.draft.kind();
        let selected_id = chooser.selected_song().map(|s| s.id.clone());

        let body = match chooser.state() {
            ChooserState::Idle => div()
                .text_sm()
                .text_color(theme.text_muted)
                .child(match kind {
                    ItemKind::Collab => "Pick artists to see their shared catalog",
                    _ => "Pick an artist to see their songs",
                })
                .into_any_element(),
            ChooserState::Loading => div()
                .text_sm()
                .text_color(theme.text_muted)
                .child("Loading songs...")
                .into_any_element(),
            ChooserState::Ready(songs) if songs.is_empty() => div()
                .text_sm()
                .text_color(theme.text_muted)
                .child("No songs available")
                .into_any_element(),
            ChooserState::Ready(songs) => {
                let mut list = div().flex().flex_col().gap_1();
                for song in songs {
                    let picked = selected_id.as_deref() == Some(song.id.as_str());
                    let song_id = song.id.clone();
                    list = list.child(
                        div()
                            .id(SharedString::from(format!("song-{}", song.id)))
                            .px_3()
                            .py_1()
                            .text_sm()
                            .rounded_md()
                            .border_1()
                            .border_color(if picked { theme.accent } else { theme.border })
                            .bg(if picked {
                                theme.accent.opacity(0.2)
                            } else {
                                theme.bg_card
                            })
                            .text_color(theme.text)
                            .cursor_pointer()
                            .hover(|s| s.bg(theme.bg_card_hover))
                            .on_click(cx.listener(move |this, _, _window, cx| {
                                match this.draft.kind() {
                                    ItemKind::Headliner => {
                                        this.draft.select_headliner_song(&song_id)
                                    }
                                    ItemKind::Collab => this.draft.select_collab_song(&song_id),
                                    _ => {}
                                }
                                cx.notify();
                            }))
                            .child(song.option_label()),
                    );
                }
                list.into_any_element()
            }
        };

        div()
            .flex()
            .flex_col()
            .gap_2()
            .child(div().text_xs().text_color(theme.text_muted).child("Song"))
            .child(body)
    }

    /// Render the minutes stepper for kinds with a fixed duration
    fn render_minutes_field(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let minutes = self.draft.active_minutes().unwrap_or(0);

        let step_button = |id: &str, label: &'static str, delta: i64, cx: &mut Context<Self>| {
            div()
                .id(SharedString::from(id.to_string()))
                .px_2()
                .py_1()
                .text_sm()
                .rounded_md()
                .border_1()
                .border_color(theme.border)
                .bg(theme.bg_card)
                .text_color(theme.text)
                .cursor_pointer()
                .hover(|s| s.bg(theme.bg_card_hover))
                .on_click(cx.listener(move |this, _, _window, cx| {
                    this.draft.step_active_minutes(delta);
                    cx.notify();
                }))
                .child(label)
        };

        div()
            .flex()
            .flex_col()
            .gap_2()
            .child(
                div()
                    .text_xs()
                    .text_color(theme.text_muted)
                    .child("Minutes (type digits or use the steppers)"),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(step_button("minus-5", "-5", -5, cx))
                    .child(step_button("minus-1", "-1", -1, cx))
                    .child(
                        div()
                            .w_16()
                            .py_1()
                            .text_center()
                            .text_base()
                            .font_weight(gpui::FontWeight::BOLD)
                            .text_color(theme.text)
                            .bg(theme.bg_card)
                            .border_1()
                            .border_color(theme.border)
                            .rounded_md()
                            .child(format!("{}", minutes)),
                    )
                    .child(step_button("plus-1", "+1", 1, cx))
                    .child(step_button("plus-5", "+5", 5, cx)),
            )
    }

    /// Render the form for the active kind
    fn render_kind_form(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let kind = self.draft.kind();
        let mut form = div().flex().flex_col().gap_4();

        match kind {
            ItemKind::Opener => {
                form = form
                    .child(self.render_artist_list(theme, cx))
                    .child(self.render_minutes_field(theme, cx));
            }
            ItemKind::Headliner => {
                form = form
                    .child(self.render_artist_list(theme, cx))
                    .child(self.render_song_chooser(self.draft.headliner_songs(), theme, cx));
            }
            ItemKind::Collab => {
                form = form
                    .child(self.render_artist_list(theme, cx))
                    .child(self.render_song_chooser(self.draft.collab_songs(), theme, cx));
            }
            ItemKind::Break | ItemKind::Intermission => {
                form = form.child(self.render_minutes_field(theme, cx));
            }
            ItemKind::Talking => {
                form = form.child(self.render_artist_list(theme, cx)).child(
                    div()
                        .text_xs()
                        .text_color(theme.text_muted)
                        .child("Talking segments have no fixed duration"),
                );
            }
        }

        form
    }
}

impl Render for ItemBuilderWindow {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = Theme::from_appearance(window.appearance());
        let can_add = self.draft.build().is_some();

        // Focus on render
        if !self.focus_handle.is_focused(window) {
            self.focus_handle.focus(window);
        }

        div()
            .key_context("ItemBuilderWindow")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                this.handle_key(event, window, cx);
            }))
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.bg)
            // Kind selector
            .child(
                div()
                    .w_full()
                    .p_4()
                    .border_b_1()
                    .border_color(theme.border)
                    .child(self.render_kind_selector(&theme, cx)),
            )
            // Active kind form (scrollable)
            .child(
                div()
                    .id("builder-form-scroll")
                    .flex_1()
                    .w_full()
                    .overflow_scroll()
                    .p_4()
                    .child(self.render_kind_form(&theme, cx)),
            )
            // Footer with Cancel and Add buttons
            .child(
                div()
                    .w_full()
                    .p_4()
                    .flex()
                    .items_center()
                    .justify_end()
                    .gap_2()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(
                        div()
                            .id(SharedString::from("cancel-btn"))
                            .px_4()
                            .py_2()
                            .text_sm()
                            .text_color(theme.text)
                            .bg(theme.bg_card)
                            .border_1()
                            .border_color(theme.border)
                            .rounded_md()
                            .cursor_pointer()
                            .hover(|s| s.bg(theme.bg_card_hover))
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.cancel(window, cx);
                            }))
                            .child("Cancel"),
                    )
                    .child(
                        div()
                            .id(SharedString::from("add-btn"))
                            .px_4()
                            .py_2()
                            .text_sm()
                            .text_color(if can_add {
                                gpui::white()
                            } else {
                                theme.text_muted
                            })
                            .bg(if can_add { theme.accent } else { theme.bg_card })
                            .rounded_md()
                            .when(can_add, |el| {
                                el.cursor_pointer().hover(|s| s.bg(theme.success))
                            })
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.add_and_close(window, cx);
                            }))
                            .child("Add to Set"),
                    ),
            )
    }
}
