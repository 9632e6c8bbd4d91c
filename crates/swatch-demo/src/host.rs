//! Demo host screen.
//!
//! Shows four reactive buttons side by side, one per binding
//! configuration, and drives them from two broadcast emitters:
//!
//! | caption        | label stream | color stream |
//! |----------------|--------------|--------------|
//! | Plain          | -            | -            |
//! | Label stream   | titles       | -            |
//! | Color stream   | -            | colors       |
//! | Both streams   | titles       | colors       |
//!
//! While the screen is active, two timers tick once per time unit. The
//! title timer alternates "Select All" / "Delete All"; the color timer
//! picks a uniformly random palette entry.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swatch_render::{Frame, HitId, Rect};
use swatch_runtime::{Cmd, Event, Every, KeyCode, Model, SubId, Subject};
use swatch_style::{SemanticColor, Style};
use swatch_widgets::{Label, MountedButton, ReactiveButton, Widget};
use tracing::{debug, info};

use crate::cli::DemoConfig;

pub const TITLE_TICKER: SubId = SubId("title-ticker");
pub const COLOR_TICKER: SubId = SubId("color-ticker");

/// Titles the label timer alternates between, in order.
pub const TITLES: [&str; 2] = ["Select All", "Delete All"];

/// Label every button starts with.
pub const INITIAL_LABEL: &str = "Custom Button";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    TitleTick,
    ColorTick,
    TogglePause,
    /// Click the button at this index.
    Click(usize),
    /// Click whichever button owns this hit region.
    ClickHit(HitId),
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.is_ctrl_c() => Msg::Quit,
            Event::Key(key) if key.code == KeyCode::Esc => Msg::Quit,
            Event::Key(key) if key.is_char('q') => Msg::Quit,
            Event::Key(key) if key.is_char(' ') => Msg::TogglePause,
            Event::Key(key) => match key.code {
                KeyCode::Char(c @ '1'..='4') if key.is_char(c) => {
                    Msg::Click(usize::from(c as u8 - b'1'))
                }
                _ => Msg::Noop,
            },
            Event::Mouse(mouse) if mouse.is_left_click() => {
                mouse.hit.map_or(Msg::Noop, Msg::ClickHit)
            }
            _ => Msg::Noop,
        }
    }
}

/// Cycles through [`TITLES`].
#[derive(Debug, Default)]
pub struct TitleCycler {
    next: usize,
}

impl TitleCycler {
    pub fn next_title(&mut self) -> &'static str {
        let title = TITLES[self.next % TITLES.len()];
        self.next = (self.next + 1) % TITLES.len();
        title
    }
}

/// Uniform picks from [`SemanticColor::PALETTE`].
#[derive(Debug)]
pub struct ColorPicker {
    rng: StdRng,
}

impl ColorPicker {
    /// Seeded pickers repeat the same sequence; unseeded ones use OS entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn pick(&mut self) -> SemanticColor {
        let palette = SemanticColor::PALETTE;
        palette[self.rng.gen_range(0..palette.len())]
    }
}

/// One showcased button and its caption.
#[derive(Debug)]
pub struct ShowcaseEntry {
    pub caption: &'static str,
    pub button: MountedButton,
}

/// The demo screen model.
#[derive(Debug)]
pub struct DemoHost {
    titles: Subject<Option<String>>,
    colors: Subject<Option<SemanticColor>>,
    cycler: TitleCycler,
    picker: ColorPicker,
    entries: Vec<ShowcaseEntry>,
    tick: Duration,
    exit_after_ticks: Option<u64>,
    limit_reached: bool,
    paused: bool,
    torn_down: bool,
    title_ticks: u64,
    color_ticks: u64,
    last_title: Option<&'static str>,
    last_color: Option<SemanticColor>,
    last_click: Option<usize>,
}

impl DemoHost {
    pub fn new(tick: Duration, seed: Option<u64>) -> Self {
        let titles = Subject::new();
        let colors = Subject::new();
        let base = ReactiveButton::new(INITIAL_LABEL);
        let entries = vec![
            ShowcaseEntry {
                caption: "Plain",
                button: base.clone().mount(),
            },
            ShowcaseEntry {
                caption: "Label stream",
                button: base.clone().with_label_stream(titles.stream()).mount(),
            },
            ShowcaseEntry {
                caption: "Color stream",
                button: base.clone().with_color_stream(colors.stream()).mount(),
            },
            ShowcaseEntry {
                caption: "Both streams",
                button: base
                    .with_label_stream(titles.stream())
                    .with_color_stream(colors.stream())
                    .mount(),
            },
        ];
        Self {
            titles,
            colors,
            cycler: TitleCycler::default(),
            picker: ColorPicker::new(seed),
            entries,
            tick,
            exit_after_ticks: None,
            limit_reached: false,
            paused: false,
            torn_down: false,
            title_ticks: 0,
            color_ticks: 0,
            last_title: None,
            last_color: None,
            last_click: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.tick, config.seed).with_exit_after_ticks(config.exit_after_ticks)
    }

    #[must_use]
    pub fn with_exit_after_ticks(mut self, ticks: Option<u64>) -> Self {
        self.exit_after_ticks = ticks;
        self
    }

    /// Timers run while this is true.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.paused && !self.torn_down
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[must_use]
    pub fn entries(&self) -> &[ShowcaseEntry] {
        &self.entries
    }

    #[must_use]
    pub fn title_ticks(&self) -> u64 {
        self.title_ticks
    }

    #[must_use]
    pub fn color_ticks(&self) -> u64 {
        self.color_ticks
    }

    #[must_use]
    pub fn last_title(&self) -> Option<&'static str> {
        self.last_title
    }

    #[must_use]
    pub fn last_color(&self) -> Option<SemanticColor> {
        self.last_color
    }

    #[must_use]
    pub fn last_click(&self) -> Option<usize> {
        self.last_click
    }

    /// The emitters, for observing what the screen broadcasts.
    #[must_use]
    pub fn title_emitter(&self) -> &Subject<Option<String>> {
        &self.titles
    }

    #[must_use]
    pub fn color_emitter(&self) -> &Subject<Option<SemanticColor>> {
        &self.colors
    }

    /// Stop the timers and release every button subscription.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.entries.clear();
        info!(
            title_ticks = self.title_ticks,
            color_ticks = self.color_ticks,
            "demo screen torn down"
        );
    }

    /// One-line summary of the screen state.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "tick {} | {} | title: {} | color: {}",
            self.title_ticks,
            if self.paused { "paused" } else { "running" },
            self.last_title.unwrap_or("-"),
            self.last_color.map_or("-", SemanticColor::name),
        )
    }

    /// Machine-friendly state line: tick count plus every button's label
    /// and color.
    #[must_use]
    pub fn state_line(&self) -> String {
        let buttons: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "{}={}/{}",
                    entry.caption,
                    entry.button.label(),
                    entry.button.color()
                )
            })
            .collect();
        format!("tick={} {}", self.title_ticks, buttons.join(" | "))
    }

    fn emit_title(&mut self) -> Cmd<Msg> {
        let title = self.cycler.next_title();
        self.title_ticks += 1;
        self.last_title = Some(title);
        let receivers = self.titles.send(Some(title.to_string()));
        debug!(tick = self.title_ticks, title, receivers, "title emitted");
        if self.exit_after_ticks.is_some_and(|limit| self.title_ticks >= limit) {
            info!(ticks = self.title_ticks, "tick limit reached");
            self.limit_reached = true;
        }
        Cmd::none()
    }

    /// The color timer shares the title deadline and fires after it, so the
    /// final tick quits here once both halves of it have been emitted.
    fn emit_color(&mut self) -> Cmd<Msg> {
        let color = self.picker.pick();
        self.color_ticks += 1;
        self.last_color = Some(color);
        let receivers = self.colors.send(Some(color));
        debug!(tick = self.color_ticks, %color, receivers, "color emitted");
        if self.limit_reached {
            Cmd::quit()
        } else {
            Cmd::none()
        }
    }

    fn click(&mut self, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            entry.button.click();
            self.last_click = Some(index);
        }
    }
}

impl Drop for DemoHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Model for DemoHost {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        info!(tick_ms = self.tick.as_millis() as u64, "demo screen active");
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::TitleTick => return self.emit_title(),
            Msg::ColorTick => return self.emit_color(),
            Msg::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "timers toggled");
            }
            Msg::Click(index) => self.click(index),
            Msg::ClickHit(hit) => {
                if let Some(index) = self.entries.iter().position(|e| e.button.hit_id() == hit) {
                    self.click(index);
                }
            }
            Msg::Quit => {
                self.teardown();
                return Cmd::quit();
            }
            Msg::Noop => {}
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.bounds();
        if area.is_empty() {
            return;
        }
        let (header, body) = area.split_top(1);
        let (grid, status) = body.split_top(body.height.saturating_sub(1));

        Label::new("Reactive buttons")
            .style(Style::new().bold())
            .centered()
            .render(header, frame);

        let col_w = grid.width / 2;
        let row_h = grid.height / 2;
        for (i, entry) in self.entries.iter().enumerate() {
            let col = (i % 2) as u16;
            let row = (i / 2) as u16;
            let cell = Rect::new(
                grid.x + col * col_w,
                grid.y + row * row_h,
                col_w,
                row_h,
            );
            let (caption, rest) = cell.split_top(1);
            Label::new(format!("{}. {}", i + 1, entry.caption))
                .centered()
                .render(caption, frame);
            let (w, h) = entry.button.size();
            entry.button.render(rest.centered(w, h), frame);
        }

        Label::new(format!("{}  [q quit, space pause, 1-4 click]", self.status_line()))
            .style(Style::new().fg(SemanticColor::White).bg(SemanticColor::Indigo))
            .render(status, frame);
    }

    fn subscriptions(&self) -> Vec<Every<Msg>> {
        if !self.is_active() {
            return vec![];
        }
        vec![
            Every::new(TITLE_TICKER, self.tick, || Msg::TitleTick),
            Every::new(COLOR_TICKER, self.tick, || Msg::ColorTick),
        ]
    }
}
