use unfurl_core::{AnimationSpec, Color, DrawOp, Easing};
use unfurl_effect::*;
use web_time::{Duration, Instant};

const BODY: &str = "Unfurl truncates long passages to a handful of lines. \
When the reader asks for more, the hidden lines fade in one after another, \
sharpening out of a blur, while the label on the last visible line fades away. \
Collapsing again plays the same reveal backwards.";

const FRAME: Duration = Duration::from_millis(16);

fn summarize(label: &str, frame: &Frame) {
    let visible = frame.ops.iter().filter(|op| op.opacity() > 0.0).count();
    let more = frame
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Label { opacity, .. } => Some(*opacity),
            _ => None,
        })
        .unwrap_or(0.0);
    log::info!(
        "{label:>10}: progress={:.2} height={:.1} visible_ops={visible} more_label={more:.2}",
        frame.progress,
        frame.size.height,
    );
}

fn run_transition(text: &mut TruncatedText, width: f32, start: Instant) -> anyhow::Result<Instant> {
    let mut now = start;
    loop {
        let frame = text.frame_at(width, now)?;
        summarize(if text.is_enabled() { "collapsing" } else { "expanding" }, &frame);
        if !text.is_animating() {
            return Ok(now);
        }
        now += FRAME;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting truncation demo");

    let width = 280.0;
    let mut text = Text(BODY)
        .size(16.0)
        .color(Color::from_hex("#E0E0E0"))
        .truncation_effect(
            3,
            true,
            AnimationSpec::tween(Duration::from_millis(240), Easing::EaseInOut),
        )?;

    let t0 = Instant::now();
    let first = text.frame_at(width, t0)?;
    summarize("appeared", &first);
    println!("{} scene nodes while collapsed", first.to_scene().nodes.len());

    text.set_enabled_at(false, t0);
    let t1 = run_transition(&mut text, width, t0)?;

    text.set_enabled_at(true, t1);
    let t2 = run_transition(&mut text, width, t1)?;

    // Interrupt an expansion halfway; the collapse starts where it left off.
    text.set_enabled_at(false, t2);
    let half = t2 + Duration::from_millis(120);
    summarize("interrupt", &text.frame_at(width, half)?);
    text.set_enabled_at(true, half);
    run_transition(&mut text, width, half)?;

    Ok(())
}
