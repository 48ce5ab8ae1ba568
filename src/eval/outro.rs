use crate::{
    animation::interp::{InterpolateOpts, interpolate},
    animation::spring::{Spring, SpringConfig},
    eval::element::{ENTER_FRAMES, ElementPhase, ElementRole, ElementState},
    foundation::core::{Fps, Transform2D},
    script::model::{OutroAnimation, OutroScene},
};

const LIFESTYLE_DIM: f64 = 0.6;
const SUBLINE_DIM: f64 = 0.7;
const CASCADE_SPRING: SpringConfig = SpringConfig::new(10.0, 100.0, 1.0);
const CASCADE_FIRST_DELAY: u64 = 12;
const CASCADE_STAGGER: u64 = 12;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual state of the outro for one frame.
pub struct OutroState {
    /// Frame relative to the outro start.
    pub local_frame: u64,
    /// Section lifecycle phase. The outro holds until the video ends; it never exits.
    pub phase: ElementPhase,
    /// Card opacity, already folded into every element.
    pub card_opacity: f64,
    /// Card first, then its content in draw order.
    pub elements: Vec<ElementState>,
}

/// Evaluate the outro at outro-local frame `local`.
pub fn eval_outro(outro: &OutroScene, local: u64, fps: Fps) -> OutroState {
    let f = local as f64;
    let card_window = match outro.animation {
        OutroAnimation::FadeReveal => [0, 15],
        OutroAnimation::SlideUpReveal | OutroAnimation::SpecsCascade => [0, 12],
    };
    let card = ramp(f, card_window);
    let ctx = Card {
        f,
        opacity: card,
        fps,
    };

    let mut elements = vec![ElementState::decoration(ElementRole::Card, card)];
    elements.extend(match outro.animation {
        OutroAnimation::FadeReveal => fade_reveal(outro, ctx),
        OutroAnimation::SlideUpReveal => slide_up_reveal(outro, ctx),
        OutroAnimation::SpecsCascade => specs_cascade(outro, ctx),
    });

    OutroState {
        local_frame: local,
        phase: ElementPhase::since_start(local, outro.duration_frames, ENTER_FRAMES, 0),
        card_opacity: card,
        elements,
    }
}

// Frame plus the card opacity every child inherits.
#[derive(Clone, Copy)]
struct Card {
    f: f64,
    opacity: f64,
    fps: Fps,
}

fn ramp(f: f64, [a, b]: [u64; 2]) -> f64 {
    interpolate(f, [a as f64, b as f64], [0.0, 1.0], InterpolateOpts::CLAMP_RIGHT)
}

impl Card {
    fn ramp(self, window: [u64; 2]) -> f64 {
        ramp(self.f, window)
    }

    fn spring(self, delay: u64, spring: Spring) -> f64 {
        spring.sample((self.f - delay as f64).max(0.0), self.fps)
    }

    fn text(self, role: ElementRole, text: &str, own: f64) -> ElementState {
        ElementState::text(role, text, own * self.opacity)
    }

    fn accent(self, window: [u64; 2]) -> ElementState {
        ElementState::decoration(ElementRole::AccentLine, self.ramp(window) * self.opacity)
    }
}

fn rise(y: f64) -> Transform2D {
    Transform2D::translate(0.0, y)
}

// Card fades in, lines fade in one after another.
fn fade_reveal(outro: &OutroScene, c: Card) -> Vec<ElementState> {
    let mut out = Vec::new();
    if let Some(line) = &outro.lifestyle_line {
        out.push(c.text(ElementRole::Lifestyle, line, c.ramp([5, 20]) * LIFESTYLE_DIM));
    }
    out.push(c.text(ElementRole::Headline, &outro.headline, c.ramp([10, 25])));
    if let Some(subline) = &outro.subline {
        out.push(c.accent([18, 30]));
        out.push(c.text(ElementRole::Subline, subline, c.ramp([22, 35]) * SUBLINE_DIM));
    }
    if let Some(cta) = &outro.cta_text {
        out.push(c.text(ElementRole::Cta, cta, c.ramp([30, 45])));
    }
    out
}

// Lines spring up from below in turn.
fn slide_up_reveal(outro: &OutroScene, c: Card) -> Vec<ElementState> {
    let mut out = Vec::new();
    if let Some(line) = &outro.lifestyle_line {
        let y = c.spring(3, Spring::new(30.0, 0.0).duration(18.0));
        out.push(
            c.text(ElementRole::Lifestyle, line, c.ramp([3, 16]) * LIFESTYLE_DIM)
                .with_transform(rise(y)),
        );
    }

    let y = c.spring(
        10,
        Spring::new(40.0, 0.0)
            .duration(18.0)
            .config(SpringConfig::new(10.0, 120.0, 1.0)),
    );
    out.push(
        c.text(ElementRole::Headline, &outro.headline, c.ramp([10, 22]))
            .with_transform(rise(y)),
    );

    if let Some(subline) = &outro.subline {
        out.push(c.accent([20, 30]));
        let y = c.spring(22, Spring::new(30.0, 0.0).duration(18.0));
        out.push(
            c.text(ElementRole::Subline, subline, c.ramp([22, 34]) * SUBLINE_DIM)
                .with_transform(rise(y)),
        );
    }
    if let Some(cta) = &outro.cta_text {
        let y = c.spring(
            32,
            Spring::new(25.0, 0.0)
                .duration(15.0)
                .config(SpringConfig::new(8.0, 150.0, 1.0)),
        );
        out.push(c.text(ElementRole::Cta, cta, c.ramp([32, 42])).with_transform(rise(y)));
    }
    out
}

// Headline, subline and CTA slide in from the right, 12 frames apart.
fn specs_cascade(outro: &OutroScene, c: Card) -> Vec<ElementState> {
    let mut out = Vec::new();
    if let Some(line) = &outro.lifestyle_line {
        let x = c.spring(
            5,
            Spring::new(50.0, 0.0)
                .duration(20.0)
                .config(CASCADE_SPRING),
        );
        out.push(
            c.text(ElementRole::Lifestyle, line, c.ramp([5, 18]) * LIFESTYLE_DIM)
                .with_transform(Transform2D::translate(x, 0.0)),
        );
    }

    let mut items = vec![(ElementRole::Headline, outro.headline.as_str())];
    items.extend(outro.subline.as_deref().map(|s| (ElementRole::Subline, s)));
    items.extend(outro.cta_text.as_deref().map(|s| (ElementRole::Cta, s)));
    let count = items.len();

    for (i, (role, text)) in items.into_iter().enumerate() {
        let delay = CASCADE_FIRST_DELAY + i as u64 * CASCADE_STAGGER;
        let x = c.spring(
            delay,
            Spring::new(60.0, 0.0)
                .duration(20.0)
                .config(CASCADE_SPRING),
        );
        out.push(
            c.text(role, text, c.ramp([delay, delay + 12]))
                .with_transform(Transform2D::translate(x, 0.0)),
        );
        if role == ElementRole::Headline && count > 1 {
            out.push(c.accent([delay + 8, delay + 18]));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/eval/outro.rs"]
mod tests;
