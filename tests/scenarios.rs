//! End-to-end behaviour of the strip chart: ingest, follow, pan, render.

use std::time::{Duration, Instant};

use strip_monitor::engine::{Axis, DragSource, LineWeight};
use strip_monitor::{EngineConfig, InputEvent, Mode, Primitive, Sample, StripChart};

fn chart(scale: f64, width: f64) -> StripChart {
    let mut chart = StripChart::new(EngineConfig::with_scale(scale)).expect("valid config");
    chart.resize(width, 135.0);
    chart
}

fn segments(chart: &StripChart, ch: usize) -> Vec<Primitive> {
    chart
        .render()
        .primitives()
        .filter(|p| matches!(p, Primitive::Segment { channel, .. } if *channel == ch))
        .collect()
}

#[test]
fn window_of_fifty_samples_draws_fifty_segments() {
    let mut chart = chart(2.0, 100.0);
    chart.ingest((1..=100).map(|i| Sample::single(i, if i % 2 == 0 { 1420.0 } else { 1400.0 })));

    assert_eq!(chart.render().visible_range(), Some((50, 100)));
    assert_eq!(segments(&chart, 0).len(), 50);
    assert!(segments(&chart, 1).is_empty());

    let labelled_fifty = chart.render().primitives().any(|p| match p {
        Primitive::Label {
            axis: Axis::Value,
            text,
            ..
        } => text.parse::<f64>().is_ok_and(|v| v % 50.0 == 0.0),
        _ => false,
    });
    assert!(labelled_fifty);

    let majors = chart
        .render()
        .primitives()
        .filter(|p| {
            matches!(
                p,
                Primitive::GridLine {
                    axis: Axis::Value,
                    weight: LineWeight::Major,
                    ..
                }
            )
        })
        .count();
    assert!(majors > 0);
}

#[test]
fn implausible_spike_is_not_drawn_and_keeps_range() {
    let mut chart = chart(1.0, 200.0);
    chart.ingest((1..=9).map(|i| Sample::mirrored(i, 1400.0)));
    let before = chart.range();

    chart.ingest([Sample::mirrored(10, 5000.0)]);
    chart.ingest((11..=20).map(|i| Sample::mirrored(i, 1400.0)));

    assert_eq!(chart.range(), before);
    // pairs 9->10 and 10->11 are rejected
    assert_eq!(segments(&chart, 0).len(), 17);
}

#[test]
fn auto_mode_keeps_newest_sample_at_right_edge() {
    let mut chart = chart(1.0, 120.0);
    for batch in 0..100 {
        let base = batch * 4 + 1;
        chart.ingest((base..base + 4).map(|i| Sample::mirrored(i, 1400.0)));
        let highest = chart.store().highest_index();
        let last = chart.render().visible_range().map(|r| r.1);
        assert_eq!(last, highest);
    }
    assert_eq!(chart.viewport().mode(), Mode::Auto);
}

#[test]
fn manual_pan_survives_new_data_then_reverts_once() {
    let mut chart = chart(1.0, 100.0);
    chart.ingest((1..=400).map(|i| Sample::mirrored(i, 1400.0)));
    let t0 = Instant::now();

    chart.handle_input(
        InputEvent::DragBegin {
            source: DragSource::Canvas,
            x: 10.0,
        },
        t0,
    );
    chart.handle_input(InputEvent::DragMove { x: 90.0 }, t0);
    chart.handle_input(InputEvent::DragEnd, t0);
    assert_eq!(chart.viewport().mode(), Mode::Manual);
    let paused_at = chart.viewport().offset();

    chart.ingest((401..=440).map(|i| Sample::mirrored(i, 1400.0)));
    assert_eq!(chart.viewport().offset(), paused_at);

    assert!(!chart.tick(t0 + Duration::from_secs(4)));
    assert!(chart.tick(t0 + Duration::from_secs(5)));
    assert!(!chart.tick(t0 + Duration::from_secs(6)));
    assert_eq!(chart.viewport().mode(), Mode::Auto);
    assert_eq!(chart.render().visible_range().map(|r| r.1), Some(440));
}

#[test]
fn third_channel_draws_its_own_values() {
    let mut chart = chart(1.0, 100.0);
    chart.ingest((1..=10).map(|i| Sample::new(i, [Some(1400.0), Some(1400.0), Some(1600.0)])));

    let ys = |ch: usize| {
        segments(&chart, ch)
            .first()
            .and_then(|p| match p {
                Primitive::Segment { from, .. } => Some(from.y),
                _ => None,
            })
            .unwrap_or(f64::NAN)
    };
    let mapper = *chart.render().mapper();
    assert_eq!(ys(0), mapper.y(1400.0));
    assert_eq!(ys(1), mapper.y(1400.0) + 6.0);
    assert_eq!(ys(2), mapper.y(1600.0) - 6.0);
}

#[test]
fn unsized_chart_draws_nothing() {
    let mut chart = StripChart::new(EngineConfig::default()).expect("valid config");
    chart.ingest((1..=10).map(|i| Sample::mirrored(i, 1400.0)));
    assert_eq!(chart.render().primitives().count(), 0);
}

#[test]
fn follow_latest_cancels_pending_revert() {
    let mut chart = chart(1.0, 100.0);
    chart.ingest((1..=400).map(|i| Sample::mirrored(i, 1400.0)));
    let t0 = Instant::now();
    chart.handle_input(InputEvent::ScrollTo { offset: 0.0 }, t0);
    assert!(chart.viewport().revert_deadline().is_some());

    chart.follow_latest();
    assert_eq!(chart.viewport().mode(), Mode::Auto);
    assert_eq!(chart.viewport().revert_deadline(), None);
    assert!(!chart.tick(t0 + Duration::from_secs(10)));
}
