#![forbid(unsafe_code)]

//! A button whose label and color can follow update streams.
//!
//! [`ReactiveButton`] is a plain value: a starting label, optional streams
//! for the label and the background color, and a click action. Builders
//! take `self` and return the modified button, so configurations compose
//! by chaining and cloning.
//!
//! [`ReactiveButton::mount`] turns the description into a live
//! [`MountedButton`] that subscribes to the bound streams. Each `Some`
//! emission overwrites one field of the button's [`ButtonState`]; `None`
//! emissions are ignored. Dropping the mounted button releases both
//! subscriptions.
//!
//! ```
//! use swatch_runtime::Subject;
//! use swatch_style::SemanticColor;
//! use swatch_widgets::ReactiveButton;
//!
//! let titles: Subject<Option<String>> = Subject::new();
//! let button = ReactiveButton::new("Custom Button")
//!     .with_label_stream(titles.stream())
//!     .mount();
//!
//! assert_eq!(button.label(), "Custom Button");
//! titles.send(Some("Select All".into()));
//! assert_eq!(button.label(), "Select All");
//! titles.send(None);
//! assert_eq!(button.label(), "Select All");
//! assert_eq!(button.color(), SemanticColor::Blue);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use swatch_render::buffer::text_width;
use swatch_render::{Frame, HitId, Rect};
use swatch_runtime::{Observable, Subscription, UpdateStream};
use swatch_style::{SemanticColor, Style};
use tracing::{debug, trace};

use crate::Widget;

/// Preferred button size in cells.
pub const DEFAULT_SIZE: (u16, u16) = (20, 3);

static NEXT_HIT_ID: AtomicU32 = AtomicU32::new(1);

type ClickAction = Rc<dyn Fn()>;

/// What a button currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub label: String,
    pub color: SemanticColor,
}

/// Description of a button and its bindings.
#[derive(Clone, Default)]
pub struct ReactiveButton {
    label: String,
    label_stream: Option<UpdateStream<Option<String>>>,
    color_stream: Option<UpdateStream<Option<SemanticColor>>>,
    on_click: Option<ClickAction>,
    size: Option<(u16, u16)>,
}

impl fmt::Debug for ReactiveButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveButton")
            .field("label", &self.label)
            .field("label_stream", &self.label_stream.is_some())
            .field("color_stream", &self.color_stream.is_some())
            .field("on_click", &self.on_click.is_some())
            .field("size", &self.size())
            .finish()
    }
}

impl ReactiveButton {
    /// A button showing `label` on the default blue background.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Follow `stream` for the label, replacing any earlier label binding.
    #[must_use]
    pub fn with_label_stream(mut self, stream: UpdateStream<Option<String>>) -> Self {
        self.label_stream = Some(stream);
        self
    }

    /// Follow `stream` for the background color, replacing any earlier
    /// color binding.
    #[must_use]
    pub fn with_color_stream(mut self, stream: UpdateStream<Option<SemanticColor>>) -> Self {
        self.color_stream = Some(stream);
        self
    }

    /// Run `action` on click instead of the default no-op.
    #[must_use]
    pub fn on_click(mut self, action: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn has_label_stream(&self) -> bool {
        self.label_stream.is_some()
    }

    #[must_use]
    pub fn has_color_stream(&self) -> bool {
        self.color_stream.is_some()
    }

    /// Preferred `(width, height)` in cells.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.size.unwrap_or(DEFAULT_SIZE)
    }

    /// Go live: subscribe to the bound streams.
    pub fn mount(self) -> MountedButton {
        let hit_id = HitId(NEXT_HIT_ID.fetch_add(1, Ordering::Relaxed));
        let mut mounted = MountedButton {
            state: Observable::new(ButtonState {
                label: self.label,
                color: SemanticColor::default(),
            }),
            label_binding: None,
            color_binding: None,
            on_click: self.on_click,
            size: self.size.unwrap_or(DEFAULT_SIZE),
            hit_id,
            clicks: Cell::new(0),
        };
        if let Some(stream) = self.label_stream {
            mounted.bind_label_stream(stream);
        }
        if let Some(stream) = self.color_stream {
            mounted.bind_color_stream(stream);
        }
        debug!(hit = hit_id.0, label = %mounted.label(), "button mounted");
        mounted
    }
}

/// A live button. Holds its stream subscriptions until dropped.
pub struct MountedButton {
    state: Observable<ButtonState>,
    label_binding: Option<Subscription>,
    color_binding: Option<Subscription>,
    on_click: Option<ClickAction>,
    size: (u16, u16),
    hit_id: HitId,
    clicks: Cell<u64>,
}

impl fmt::Debug for MountedButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedButton")
            .field("state", &self.state)
            .field("label_bound", &self.label_binding.is_some())
            .field("color_bound", &self.color_binding.is_some())
            .field("hit_id", &self.hit_id)
            .finish_non_exhaustive()
    }
}

impl MountedButton {
    #[must_use]
    pub fn label(&self) -> String {
        self.state.with(|s| s.label.clone())
    }

    #[must_use]
    pub fn color(&self) -> SemanticColor {
        self.state.with(|s| s.color)
    }

    #[must_use]
    pub fn state(&self) -> ButtonState {
        self.state.get()
    }

    /// Bumps once per applied change. An emission equal to the current
    /// field leaves it untouched.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Future state changes.
    #[must_use]
    pub fn changes(&self) -> UpdateStream<ButtonState> {
        self.state.changes()
    }

    /// Replace the label binding. The old subscription is released before
    /// the new one is made.
    pub fn bind_label_stream(&mut self, stream: UpdateStream<Option<String>>) {
        if self.label_binding.take().is_some() {
            debug!(hit = self.hit_id.0, "label binding replaced");
        }
        let state = self.state.clone();
        let hit = self.hit_id.0;
        self.label_binding = Some(stream.subscribe(move |value: &Option<String>| {
            let Some(label) = value else {
                trace!(hit, "ignored empty label emission");
                return;
            };
            if state.update(|s| s.label.clone_from(label)) {
                debug!(hit, %label, "label applied");
            }
        }));
    }

    /// Replace the color binding. The old subscription is released before
    /// the new one is made.
    pub fn bind_color_stream(&mut self, stream: UpdateStream<Option<SemanticColor>>) {
        if self.color_binding.take().is_some() {
            debug!(hit = self.hit_id.0, "color binding replaced");
        }
        let state = self.state.clone();
        let hit = self.hit_id.0;
        self.color_binding = Some(stream.subscribe(move |value: &Option<SemanticColor>| {
            let Some(color) = *value else {
                trace!(hit, "ignored empty color emission");
                return;
            };
            if state.update(|s| s.color = color) {
                debug!(hit, %color, "color applied");
            }
        }));
    }

    /// Stop following the label stream; the current label stays.
    pub fn unbind_label_stream(&mut self) {
        self.label_binding = None;
    }

    /// Stop following the color stream; the current color stays.
    pub fn unbind_color_stream(&mut self) {
        self.color_binding = None;
    }

    #[must_use]
    pub fn is_label_bound(&self) -> bool {
        self.label_binding.is_some()
    }

    #[must_use]
    pub fn is_color_bound(&self) -> bool {
        self.color_binding.is_some()
    }

    /// Run the click action.
    pub fn click(&self) {
        self.clicks.set(self.clicks.get() + 1);
        match &self.on_click {
            Some(action) => action(),
            None => debug!(hit = self.hit_id.0, label = %self.label(), "no action"),
        }
    }

    #[must_use]
    pub fn click_count(&self) -> u64 {
        self.clicks.get()
    }

    /// The id this button registers its area under when rendered.
    #[must_use]
    pub fn hit_id(&self) -> HitId {
        self.hit_id
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.size
    }
}

impl Widget for MountedButton {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let _span = tracing::trace_span!(
            "widget_render",
            widget = "ReactiveButton",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }

        let ButtonState { label, color } = self.state();
        frame.buffer.fill(area, Style::new().bg(color));

        let text_style = Style::new().fg(SemanticColor::White).bg(color).bold();
        let x = area.x + area.width.saturating_sub(text_width(&label)) / 2;
        let y = area.y + area.height / 2;
        frame.buffer.draw_text(x, y, &label, text_style, area.right());

        frame.register_hit(area, self.hit_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_runtime::Subject;
    use swatch_style::Color;

    #[test]
    fn defaults() {
        let button = ReactiveButton::default().mount();
        assert_eq!(button.label(), "");
        assert_eq!(button.color(), SemanticColor::Blue);
        assert_eq!(button.size(), DEFAULT_SIZE);
        assert!(!button.is_label_bound());
        assert!(!button.is_color_bound());
    }

    #[test]
    fn builders_leave_the_original_untouched() {
        let titles: Subject<Option<String>> = Subject::new();
        let plain = ReactiveButton::new("Plain");
        let bound = plain.clone().with_label_stream(titles.stream());
        assert!(!plain.has_label_stream());
        assert!(bound.has_label_stream());
        assert_eq!(bound.label(), "Plain");
    }

    #[test]
    fn color_stream_applies_some_and_skips_none() {
        let colors: Subject<Option<SemanticColor>> = Subject::new();
        let button = ReactiveButton::new("Paint")
            .with_color_stream(colors.stream())
            .mount();

        colors.send(Some(SemanticColor::Mint));
        assert_eq!(button.color(), SemanticColor::Mint);
        colors.send(None);
        assert_eq!(button.color(), SemanticColor::Mint);
        assert_eq!(button.label(), "Paint");
        assert_eq!(button.version(), 1);
    }

    #[test]
    fn repeated_value_does_not_bump_version() {
        let colors: Subject<Option<SemanticColor>> = Subject::new();
        let button = ReactiveButton::new("x")
            .with_color_stream(colors.stream())
            .mount();
        colors.send(Some(SemanticColor::Blue));
        assert_eq!(button.version(), 0);
        colors.send(Some(SemanticColor::Red));
        colors.send(Some(SemanticColor::Red));
        assert_eq!(button.version(), 1);
    }

    #[test]
    fn rebinding_drops_the_old_stream() {
        let old: Subject<Option<String>> = Subject::new();
        let new: Subject<Option<String>> = Subject::new();
        let mut button = ReactiveButton::new("start")
            .with_label_stream(old.stream())
            .mount();

        button.bind_label_stream(new.stream());
        assert_eq!(old.live_subscriber_count(), 0);

        old.send(Some("stale".into()));
        assert_eq!(button.label(), "start");
        new.send(Some("fresh".into()));
        assert_eq!(button.label(), "fresh");
    }

    #[test]
    fn builder_rebinding_keeps_only_the_last_stream() {
        let first: Subject<Option<SemanticColor>> = Subject::new();
        let second: Subject<Option<SemanticColor>> = Subject::new();
        let button = ReactiveButton::new("b")
            .with_color_stream(first.stream())
            .with_color_stream(second.stream())
            .mount();

        first.send(Some(SemanticColor::Red));
        assert_eq!(button.color(), SemanticColor::Blue);
        second.send(Some(SemanticColor::Green));
        assert_eq!(button.color(), SemanticColor::Green);
    }

    #[test]
    fn unbind_keeps_current_value() {
        let titles: Subject<Option<String>> = Subject::new();
        let mut button = ReactiveButton::new("a")
            .with_label_stream(titles.stream())
            .mount();
        titles.send(Some("b".into()));
        button.unbind_label_stream();
        titles.send(Some("c".into()));
        assert_eq!(button.label(), "b");
        assert_eq!(titles.live_subscriber_count(), 0);
    }

    #[test]
    fn drop_releases_subscriptions() {
        let titles: Subject<Option<String>> = Subject::new();
        let colors: Subject<Option<SemanticColor>> = Subject::new();
        let button = ReactiveButton::new("x")
            .with_label_stream(titles.stream())
            .with_color_stream(colors.stream())
            .mount();
        assert_eq!(titles.live_subscriber_count(), 1);
        assert_eq!(colors.live_subscriber_count(), 1);
        drop(button);
        assert_eq!(titles.live_subscriber_count(), 0);
        assert_eq!(colors.live_subscriber_count(), 0);
    }

    #[test]
    fn click_runs_custom_action_or_nothing() {
        let plain = ReactiveButton::new("p").mount();
        plain.click();
        assert_eq!(plain.click_count(), 1);
        assert_eq!(plain.label(), "p");

        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let custom = ReactiveButton::new("c")
            .on_click(move || h.set(h.get() + 1))
            .mount();
        custom.click();
        custom.click();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn changes_stream_reports_new_state() {
        let titles: Subject<Option<String>> = Subject::new();
        let button = ReactiveButton::new("a")
            .with_label_stream(titles.stream())
            .mount();
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = button
            .changes()
            .subscribe(move |state: &ButtonState| s.borrow_mut().push(state.label.clone()));
        titles.send(Some("b".into()));
        titles.send(None);
        titles.send(Some("c".into()));
        assert_eq!(*seen.borrow(), vec!["b", "c"]);
    }

    #[test]
    fn render_fills_background_and_centers_label() {
        let button = ReactiveButton::new("Go").mount();
        let mut frame = Frame::new(10, 3);
        button.render(frame.bounds(), &mut frame);

        assert_eq!(frame.buffer.row_text(1), "    Go    ");
        let blue: Color = SemanticColor::Blue.into();
        let white: Color = SemanticColor::White.into();
        for y in 0..3 {
            for x in 0..10 {
                assert_eq!(frame.buffer.get(x, y).and_then(|c| c.bg), Some(blue));
            }
        }
        assert_eq!(frame.buffer.get(4, 1).and_then(|c| c.fg), Some(white));
        assert_eq!(frame.hit_test(0, 0), Some(button.hit_id()));
    }

    #[test]
    fn render_truncates_long_labels() {
        let button = ReactiveButton::new("Delete Everything").mount();
        let mut frame = Frame::new(8, 1);
        button.render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "Delete E");
    }

    #[test]
    fn mounted_buttons_get_distinct_hit_ids() {
        let a = ReactiveButton::new("a").mount();
        let b = ReactiveButton::new("b").mount();
        assert_ne!(a.hit_id(), b.hit_id());
    }
}
