//! Host screen end-to-end behavior under a virtual clock.

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;
use swatch_demo::host::{COLOR_TICKER, DemoHost, INITIAL_LABEL, Msg, TITLE_TICKER};
use swatch_runtime::{
    Event, KeyCode, KeyEvent, Model, MouseButton, MouseEvent, MouseEventKind, ProgramSimulator,
};
use swatch_style::SemanticColor;

const TICK: Duration = Duration::from_secs(1);

fn sim(seed: u64) -> ProgramSimulator<DemoHost> {
    let mut sim = ProgramSimulator::new(DemoHost::new(TICK, Some(seed)), 80, 24);
    sim.init();
    sim
}

fn labels(host: &DemoHost) -> Vec<String> {
    host.entries().iter().map(|e| e.button.label()).collect()
}

fn key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch)))
}

#[test]
fn starts_with_initial_state_everywhere() {
    let sim = sim(1);
    for entry in sim.model().entries() {
        assert_eq!(entry.button.label(), INITIAL_LABEL);
        assert_eq!(entry.button.color(), SemanticColor::Blue);
    }
    let ids: Vec<_> = sim.model().subscriptions().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![TITLE_TICKER, COLOR_TICKER]);
}

#[test]
fn label_bound_buttons_alternate_titles() {
    let mut sim = sim(1);

    sim.advance(TICK);
    assert_eq!(
        labels(sim.model()),
        ["Custom Button", "Select All", "Custom Button", "Select All"]
    );

    sim.advance(TICK);
    assert_eq!(
        labels(sim.model()),
        ["Custom Button", "Delete All", "Custom Button", "Delete All"]
    );
}

#[test]
fn color_bound_buttons_follow_the_last_pick() {
    let mut sim = sim(99);
    for _ in 0..20 {
        sim.advance(TICK);
        let host = sim.model();
        let last = host.last_color();
        let colors: Vec<_> = host.entries().iter().map(|e| e.button.color()).collect();
        assert_eq!(colors[0], SemanticColor::Blue);
        assert_eq!(colors[1], SemanticColor::Blue);
        assert_eq!(Some(colors[2]), last);
        assert_eq!(Some(colors[3]), last);
    }
}

#[test]
fn every_palette_color_shows_up_over_many_ticks() {
    let mut sim = sim(2024);
    let mut seen = HashSet::new();
    for _ in 0..400 {
        sim.advance(TICK);
        seen.insert(sim.model().entries()[2].button.color());
    }
    let palette: HashSet<_> = SemanticColor::PALETTE.into_iter().collect();
    assert_eq!(seen, palette);
}

#[test]
fn pause_stops_emissions_and_resume_continues() {
    let mut sim = sim(1);
    sim.advance(TICK);
    sim.inject_event(key(' '));
    assert!(sim.model().is_paused());
    assert_eq!(sim.advance(TICK * 5), 0);
    assert_eq!(sim.model().title_ticks(), 1);

    sim.inject_event(key(' '));
    sim.advance(TICK);
    assert_eq!(sim.model().title_ticks(), 2);
    assert_eq!(sim.model().entries()[1].button.label(), "Delete All");
}

#[test]
fn number_keys_and_mouse_click_buttons() {
    let mut sim = sim(1);
    sim.inject_event(key('3'));
    assert_eq!(sim.model().last_click(), Some(2));
    assert_eq!(sim.model().entries()[2].button.click_count(), 1);

    sim.render();
    // Second grid column, first row: the label-bound button.
    let target = sim.model().entries()[1].button.hit_id();
    let (x, y) = (0..80u16)
        .flat_map(|x| (0..24u16).map(move |y| (x, y)))
        .find(|&(x, y)| sim.hit_test(x, y) == Some(target))
        .expect("button rendered");
    sim.inject_event(Event::Mouse(MouseEvent::new(
        MouseEventKind::Down(MouseButton::Left),
        x,
        y,
    )));
    assert_eq!(sim.model().last_click(), Some(1));
    assert_eq!(sim.model().entries()[1].button.label(), INITIAL_LABEL);
}

#[test]
fn quit_tears_down() {
    let mut sim = sim(1);
    let titles = sim.model().title_emitter().clone();
    assert_eq!(titles.live_subscriber_count(), 2);

    sim.inject_event(key('q'));
    assert!(!sim.is_running());
    assert!(sim.model().is_torn_down());
    assert_eq!(titles.live_subscriber_count(), 0);
    assert_eq!(sim.advance(TICK * 3), 0);
}

#[test]
fn exit_after_ticks_quits() {
    let host = DemoHost::new(TICK, Some(1)).with_exit_after_ticks(Some(4));
    let mut sim = ProgramSimulator::new(host, 80, 24);
    sim.init();
    sim.advance(TICK * 10);
    assert!(!sim.is_running());
    assert_eq!(sim.model().title_ticks(), 4);
}

#[test]
fn final_tick_emits_its_color_before_quitting() {
    let host = DemoHost::new(TICK, Some(9)).with_exit_after_ticks(Some(3));
    let mut sim = ProgramSimulator::new(host, 80, 24);
    sim.init();
    sim.advance(TICK * 5);
    assert!(!sim.is_running());

    let host = sim.model();
    assert_eq!(host.title_ticks(), 3);
    assert_eq!(host.color_ticks(), 3);
    let last = host.last_color().expect("color emitted on the final tick");
    let both = &host.entries()[3];
    assert_eq!(both.button.color(), last);
    assert_eq!(both.button.label(), "Select All");
}

#[test]
fn status_line_is_rendered() {
    let mut sim = sim(1);
    sim.advance(TICK);
    let screen = sim.render().to_plain_text();
    let status = screen.lines().last().unwrap_or_default();
    assert!(status.starts_with("tick 1 | running | title: Select All | color: "));
}

#[test]
fn update_ignores_noop() {
    let mut host = DemoHost::new(TICK, Some(1));
    let _ = host.update(Msg::Noop);
    assert_eq!(host.title_ticks(), 0);
}

proptest! {
    #[test]
    fn seeded_runs_are_reproducible(seed in any::<u64>(), ticks in 1usize..30) {
        let mut a = sim(seed);
        let mut b = sim(seed);
        for _ in 0..ticks {
            a.advance(TICK);
            b.advance(TICK);
            prop_assert_eq!(a.model().last_color(), b.model().last_color());
        }
        prop_assert!(a.model().last_color().is_some_and(|c| SemanticColor::PALETTE.contains(&c)));
    }
}
