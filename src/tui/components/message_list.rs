//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Display the transcript, oldest first
//! - Follow new messages: every transcript change re-pins the view to the
//!   bottom and eases toward it over a few frames
//! - Manual scrolling (keys, wheel) detaches from the bottom
//! - Layout caching of bubble heights
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `Transcript` (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
///
/// Scroll positions are transcript rows (`u32`). The `ScrollView` canvas is
/// limited to `u16::MAX` rows, so `scroll_state` holds the offset relative
/// to `window_base`, the first row of the current canvas.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, the view follows the bottom of the transcript
    pub stick_to_bottom: bool,
    /// Transcript revision the view last followed
    seen_revision: u64,
    /// Transcript row at the top of the scroll canvas
    window_base: u32,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            seen_revision: 0,
            window_base: 0,
            viewport_height: 0,
        }
    }

    /// Transcript row at the top of the viewport.
    pub fn offset(&self) -> u32 {
        self.window_base + u32::from(self.scroll_state.offset().y)
    }

    /// Scroll so transcript row `y` is at the top, moving the canvas window
    /// along if needed.
    pub fn set_offset(&mut self, y: u32) {
        self.window_base = self.layout.window_base(y);
        let relative = u16::try_from(y.saturating_sub(self.window_base)).unwrap_or(u16::MAX);
        self.scroll_state.set_offset(Position { x: 0, y: relative });
    }

    fn max_offset(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    /// Re-pin to the bottom if the transcript changed since the last frame.
    pub fn follow(&mut self, revision: u64) {
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.stick_to_bottom = true;
        }
    }

    /// One frame of smooth scrolling toward the bottom.
    ///
    /// Covers half the remaining distance per frame (at least one row), so
    /// a short hop settles in a frame or two and a long one decelerates.
    pub fn ease_toward_bottom(&mut self) {
        if !self.stick_to_bottom {
            return;
        }
        let target = self.max_offset();
        let current = self.offset();
        let next = if current < target {
            current + (target - current).div_ceil(2)
        } else {
            target
        };
        self.set_offset(next);
    }

    /// True while an eased scroll has not reached the bottom yet.
    pub fn is_animating(&self) -> bool {
        self.stick_to_bottom && self.offset() != self.max_offset()
    }

    /// True when detached from the bottom with content below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.offset() < self.max_offset()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let y = self.offset().min(self.max_offset());
        self.set_offset(y);
    }

    /// Re-engage following if a downward scroll reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.offset() >= max_y {
            self.stick_to_bottom = true;
            self.set_offset(max_y);
        }
    }

    fn scroll_up_by(&mut self, rows: u16) {
        let y = self.offset().saturating_sub(u32::from(rows));
        self.set_offset(y);
        self.stick_to_bottom = false;
    }

    fn scroll_down_by(&mut self, rows: u16) {
        let y = self.offset().saturating_add(u32::from(rows));
        self.set_offset(y.min(self.max_offset()));
        self.repin_if_at_bottom();
    }
}

/// Scrollable transcript view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub bot_label: &'a str,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        bot_label: &'a str,
    ) -> Self {
        Self {
            state,
            transcript,
            bot_label,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = self.transcript.messages();

        // 1. Update layout cache. Messages are immutable, so only new ones
        //    (or all of them after a width change) need measuring.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(reusable) {
            layout
                .heights
                .push(MessageBubble::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.content_width = content_width;

        let total_height = layout.total_height();

        // 2. Follow new content, otherwise keep manual scroll in bounds
        self.state.viewport_height = area.height;
        self.state.follow(self.transcript.revision());
        if self.state.stick_to_bottom {
            self.state.ease_toward_bottom();
        } else {
            self.state.clamp_scroll();
        }

        let layout = &self.state.layout;
        let visible_range = layout.visible_range(self.state.offset(), area.height);

        // 3. Render visible bubbles into a ScrollView covering the window
        let base = self.state.window_base;
        let canvas_height = u16::try_from(total_height.saturating_sub(base)).unwrap_or(u16::MAX);
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let height = layout.heights[i];
            let Some(top) = layout.row_of(i).checked_sub(base) else {
                continue;
            };
            // Bubbles past the window edge are off screen anyway
            if top + u32::from(height) > u32::from(canvas_height) {
                break;
            }
            let row = Rect::new(0, top as u16, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&messages[i], self.bot_label), row);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is
/// recreated every frame and cannot hold scroll state.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_up_by(1),
            TuiEvent::ScrollDown => self.scroll_down_by(1),
            TuiEvent::ScrollPageUp => self.scroll_up_by(self.viewport_height),
            TuiEvent::ScrollPageDown => self.scroll_down_by(self.viewport_height),
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running totals: `prefix_heights[i]` is the row just below message `i`
    pub prefix_heights: Vec<u32>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still valid for `message_count` messages.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc += u32::from(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// First row of message `index`.
    pub fn row_of(&self, index: usize) -> u32 {
        match index {
            0 => 0,
            i => self.prefix_heights[i - 1],
        }
    }

    /// First row of the scroll canvas for a view scrolled to `offset`.
    ///
    /// Short transcripts use one canvas from row 0. Taller ones get a window
    /// starting on the message boundary at or above a quarter canvas before
    /// `offset`, leaving room below for the viewport and the bottom rows.
    pub fn window_base(&self, offset: u32) -> u32 {
        let canvas = u32::from(u16::MAX);
        if self.total_height() <= canvas {
            return 0;
        }
        let target = offset.saturating_sub(canvas / 4);
        let index = self.prefix_heights.partition_point(|&end| end <= target);
        self.row_of(index)
    }

    /// Indices of messages intersecting the viewport, padded by half a
    /// viewport on each side.
    pub fn visible_range(
        &self,
        scroll_offset: u32,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = u32::from(viewport_height / 2);
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(u32::from(viewport_height))
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
