use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    animation::spring::{Spring, SpringConfig},
    eval::element::{ENTER_FRAMES, EXIT_FRAMES, ElementPhase, ElementRole, ElementState},
    foundation::core::{Fps, Transform2D},
    script::model::{IntroAnimation, IntroScene},
};

const RULE_WIDTH: f64 = 60.0;
const RULE_OPACITY: f64 = 0.3;
const SOFT_SPRING: SpringConfig = SpringConfig::new(12.0, 100.0, 1.0);
const TAGLINE_DIM: f64 = 0.65;
const WORD_FIRST_DELAY: u64 = 15;
const WORD_STAGGER: u64 = 6;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual state of the intro for one frame.
pub struct IntroState {
    /// Frame relative to the intro start.
    pub local_frame: u64,
    /// Section lifecycle phase.
    pub phase: ElementPhase,
    /// Shared fade-out over the last 15 frames, already folded into every element.
    pub exit_opacity: f64,
    /// Elements in draw order.
    pub elements: Vec<ElementState>,
}

/// Evaluate the intro at intro-local frame `local`.
pub fn eval_intro(intro: &IntroScene, local: u64, fps: Fps) -> IntroState {
    let f = local as f64;
    let duration = intro.duration_frames as f64;
    let exit = interpolate(
        f,
        [duration - EXIT_FRAMES as f64, duration],
        [1.0, 0.0],
        InterpolateOpts::CLAMP_BOTH,
    );
    let ctx = Ctx { f, exit, fps };

    let elements = match intro.animation {
        IntroAnimation::FadeReveal => fade_reveal(intro, ctx),
        IntroAnimation::SlideUpReveal => slide_up_reveal(intro, ctx),
        IntroAnimation::ScaleReveal => scale_reveal(intro, ctx),
    };

    IntroState {
        local_frame: local,
        phase: ElementPhase::since_start(
            local,
            intro.duration_frames,
            ENTER_FRAMES,
            EXIT_FRAMES,
        ),
        exit_opacity: exit,
        elements,
    }
}

#[derive(Clone, Copy)]
struct Ctx {
    f: f64,
    exit: f64,
    fps: Fps,
}

impl Ctx {
    // Opacity ramp from 0 to `to` over `[a, b]`, holding past `b`.
    fn ramp(self, [a, b]: [u64; 2], to: f64) -> f64 {
        interpolate(
            self.f,
            [a as f64, b as f64],
            [0.0, to],
            InterpolateOpts::CLAMP_RIGHT,
        )
    }

    // Spring released `delay` frames into the section.
    fn spring(self, delay: u64, spring: Spring) -> f64 {
        spring.sample((self.f - delay as f64).max(0.0), self.fps)
    }

    fn faded(self, opacity: f64) -> f64 {
        opacity.min(self.exit)
    }
}

fn rule(ctx: Ctx, delay: u64) -> ElementState {
    let width = ctx.spring(
        delay,
        Spring::new(0.0, RULE_WIDTH)
            .duration(20.0)
            .config(SOFT_SPRING),
    );
    ElementState::decoration(
        ElementRole::Rule,
        ctx.faded(ctx.ramp([delay, delay + 10], RULE_OPACITY)),
    )
    .with_width(width)
}

fn brand(intro: &IntroScene, opacity: f64) -> Option<ElementState> {
    intro
        .brand_name
        .as_ref()
        .map(|b| ElementState::text(ElementRole::Brand, b, opacity))
}

fn tagline(intro: &IntroScene, ctx: Ctx, opacity: f64) -> Option<ElementState> {
    intro
        .tagline
        .as_ref()
        .map(|t| ElementState::text(ElementRole::Tagline, t, ctx.faded(opacity) * TAGLINE_DIM))
}

// Brand fades in, the rule grows, then the product name rises one word at a time. Words are
// space-separated; repeated spaces yield empty words that still take a stagger slot.
fn fade_reveal(intro: &IntroScene, ctx: Ctx) -> Vec<ElementState> {
    let mut out = Vec::new();
    out.extend(brand(intro, ctx.faded(ctx.ramp([5, 20], 1.0))));
    out.push(rule(ctx, 12));

    for (i, word) in intro.product_name.split(' ').enumerate() {
        let delay = WORD_FIRST_DELAY + i as u64 * WORD_STAGGER;
        let y = ctx.spring(
            delay,
            Spring::new(25.0, 0.0)
                .duration(18.0)
                .config(SOFT_SPRING),
        );
        let opacity = ctx.ramp([delay, delay + 10], 1.0) * ctx.exit;
        out.push(
            ElementState::text(ElementRole::Word(i), word, opacity)
                .with_transform(Transform2D::translate(0.0, y)),
        );
    }

    out.extend(tagline(intro, ctx, ctx.ramp([30, 45], 1.0)));
    out
}

// Each line springs up from below in turn.
fn slide_up_reveal(intro: &IntroScene, ctx: Ctx) -> Vec<ElementState> {
    let mut out = Vec::new();

    let brand_y = ctx.spring(
        5,
        Spring::new(40.0, 0.0)
            .duration(18.0)
            .config(SOFT_SPRING),
    );
    out.extend(
        brand(intro, ctx.faded(ctx.ramp([5, 18], 1.0)))
            .map(|e| e.with_transform(Transform2D::translate(0.0, brand_y))),
    );
    out.push(rule(ctx, 14));

    let product_y = ctx.spring(
        18,
        Spring::new(50.0, 0.0)
            .duration(20.0)
            .config(SpringConfig::damped(10.0)),
    );
    out.push(
        ElementState::text(
            ElementRole::ProductName,
            &intro.product_name,
            ctx.faded(ctx.ramp([18, 30], 1.0)),
        )
        .with_transform(Transform2D::translate(0.0, product_y)),
    );

    let tagline_y = ctx.spring(30, Spring::new(30.0, 0.0).duration(18.0));
    out.extend(
        tagline(intro, ctx, ctx.ramp([30, 42], 1.0))
            .map(|e| e.with_transform(Transform2D::translate(0.0, tagline_y))),
    );
    out
}

// Brand and product name spring up from half scale.
fn scale_reveal(intro: &IntroScene, ctx: Ctx) -> Vec<ElementState> {
    let mut out = Vec::new();

    let pop = |delay: u64, frames: f64| {
        ctx.spring(
            delay,
            Spring::new(0.5, 1.0)
                .duration(frames)
                .config(SpringConfig::damped(10.0)),
        )
    };

    out.extend(
        brand(intro, ctx.faded(ctx.ramp([3, 15], 1.0)))
            .map(|e| e.with_transform(Transform2D::scale(pop(3, 15.0)))),
    );
    out.push(rule(ctx, 12));
    out.push(
        ElementState::text(
            ElementRole::ProductName,
            &intro.product_name,
            ctx.faded(ctx.ramp([15, 28], 1.0)),
        )
        .with_transform(Transform2D::scale(pop(15, 18.0))),
    );
    out.extend(tagline(intro, ctx, ctx.ramp([30, 42], 1.0)));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/eval/intro.rs"]
mod tests;
