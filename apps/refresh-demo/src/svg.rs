//! Renderer that keeps the indicator's layer state and writes it as SVG.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Write as _;
use teardrop_animation::{Phase, Timeline};
use teardrop_foundation::{
    ActivityIndicator, DismissalAnimationPlan, IndicatorRenderer, IndicatorStyle, LayerProperty,
    PathSet, PlanKind,
};
use teardrop_graphics::{Color, PathDescriptor, Point, Rect};

const SPINNER_RADIUS: f32 = 10.0;
const BACKGROUND: Color = Color::from_rgb_u8(244, 245, 247);

struct Playback {
    plan: DismissalAnimationPlan,
    timeline: Timeline,
}

struct Layers {
    style: IndicatorStyle,
    frame: Rect,
    paths: Option<PathSet>,
    translation: Point,
    hidden: bool,
    playback: Option<Playback>,
    /// Values left behind by plans that were replaced.
    committed: HashMap<LayerProperty, f32>,
}

pub struct SvgRenderer {
    layers: RefCell<Layers>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            layers: RefCell::new(Layers {
                style: IndicatorStyle::default(),
                frame: Rect::new(0.0, 0.0, 0.0, 0.0),
                paths: None,
                translation: Point::ZERO,
                hidden: false,
                playback: None,
                committed: HashMap::new(),
            }),
        }
    }

    /// Advances the running plan. Returns its kind once it completes.
    pub fn tick(&self, delta_millis: u64) -> Option<PlanKind> {
        let mut layers = self.layers.borrow_mut();
        let playback = layers.playback.as_mut()?;
        let was_complete = playback.timeline.is_complete(playback.plan.plan());
        playback.timeline.advance(delta_millis);
        let complete = playback.timeline.is_complete(playback.plan.plan());
        (complete && !was_complete).then(|| playback.plan.kind())
    }

    pub fn is_animating(&self) -> bool {
        self.layers
            .borrow()
            .playback
            .as_ref()
            .is_some_and(|playback| !playback.timeline.is_complete(playback.plan.plan()))
    }

    pub fn document(&self, activity: &Spinner) -> String {
        let layers = self.layers.borrow();
        let frame = layers.frame;
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = frame.width,
            h = frame.height,
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            frame.width,
            frame.height,
            BACKGROUND.to_css()
        );

        if let Some(paths) = layers.paths.as_ref().filter(|_| !layers.hidden) {
            let style = &layers.style;
            let body = layers
                .morphed_body()
                .unwrap_or_else(|| paths.body.clone());
            let _ = writeln!(
                svg,
                r#"  <g transform="translate({} {})" opacity="{}">"#,
                layers.translation.x,
                layers.translation.y,
                layers.opacity(LayerProperty::BodyOpacity)
            );
            let _ = writeln!(
                svg,
                r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                body.to_svg_path_data(),
                style.tint.to_css(),
                style.stroke.to_css(),
                style.stroke_width
            );
            write_layer(
                &mut svg,
                &paths.arrow,
                style.arrow_fill,
                layers.opacity(LayerProperty::ArrowOpacity),
            );
            write_layer(
                &mut svg,
                &paths.highlight,
                style.highlight_fill,
                layers.opacity(LayerProperty::HighlightOpacity),
            );
            svg.push_str("  </g>\n");
        }

        let alpha = layers.scalar(LayerProperty::ActivityAlpha, activity.alpha.get());
        let scale = layers.scalar(LayerProperty::ActivityScale, activity.scale.get());
        if activity.animating.get() && alpha > 0.0 {
            let center = activity.center.get();
            let _ = writeln!(
                svg,
                r##"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="#6b7280" stroke-width="2" opacity="{}"/>"##,
                center.x,
                center.y,
                SPINNER_RADIUS * scale,
                alpha
            );
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_layer(svg: &mut String, path: &PathDescriptor, fill: Color, opacity: f32) {
    let _ = writeln!(
        svg,
        r#"    <path d="{}" fill="{}" fill-rule="{}" opacity="{}"/>"#,
        path.to_svg_path_data(),
        fill.to_css(),
        path.fill_rule().as_svg(),
        opacity
    );
}

impl Layers {
    /// Value of `property` under the running plan. Starts from whatever an
    /// earlier plan left behind, else from `resting`.
    fn scalar(&self, property: LayerProperty, resting: f32) -> f32 {
        let from = self.committed.get(&property).copied().unwrap_or(resting);
        let Some(playback) = &self.playback else {
            return from;
        };
        let Some(transition) = playback.plan.transition(property) else {
            return from;
        };
        let Some(target) = transition.target.value.as_scalar() else {
            return from;
        };
        playback.timeline.sample(&from, &target, &transition.spec)
    }

    fn commit(&mut self) {
        let Some(playback) = self.playback.take() else {
            return;
        };
        for transition in playback.plan.plan().transitions() {
            if let Some(target) = transition.target.value.as_scalar() {
                let property = transition.target.property;
                let from = self.committed.get(&property).copied().unwrap_or(1.0);
                let value = playback.timeline.sample(&from, &target, &transition.spec);
                self.committed.insert(property, value);
            }
        }
    }

    fn opacity(&self, property: LayerProperty) -> f32 {
        self.scalar(property, 1.0)
    }

    fn morphed_body(&self) -> Option<PathDescriptor> {
        let playback = self.playback.as_ref()?;
        let transition = playback.plan.transition(LayerProperty::BodyPath)?;
        match playback.timeline.phase(&transition.spec) {
            Phase::Pending => None,
            _ => transition.target.value.as_path().cloned(),
        }
    }
}

impl IndicatorRenderer for SvgRenderer {
    fn apply_style(&self, style: &IndicatorStyle) {
        self.layers.borrow_mut().style = *style;
    }

    fn set_frame(&self, frame: Rect) {
        self.layers.borrow_mut().frame = frame;
    }

    fn set_paths(&self, paths: &PathSet) {
        self.layers.borrow_mut().paths = Some(paths.clone());
    }

    fn clear_paths(&self) {
        self.layers.borrow_mut().paths = None;
    }

    fn set_body_translation(&self, translation: Point) {
        self.layers.borrow_mut().translation = translation;
    }

    fn set_body_hidden(&self, hidden: bool) {
        self.layers.borrow_mut().hidden = hidden;
    }

    fn set_body_fill(&self, color: Color) {
        self.layers.borrow_mut().style.tint = color;
    }

    fn run(&self, plan: &DismissalAnimationPlan) {
        log::debug!(
            "playing {:?} plan ({} ms)",
            plan.kind(),
            plan.total_duration_millis()
        );
        let mut layers = self.layers.borrow_mut();
        layers.commit();
        layers.playback = Some(Playback {
            plan: plan.clone(),
            timeline: Timeline::new(),
        });
    }

    fn remove_all_animations(&self) {
        let mut layers = self.layers.borrow_mut();
        layers.playback = None;
        layers.committed.clear();
    }
}

/// Activity indicator drawn as a ring.
pub struct Spinner {
    center: Cell<Point>,
    alpha: Cell<f32>,
    scale: Cell<f32>,
    animating: Cell<bool>,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            center: Cell::new(Point::ZERO),
            alpha: Cell::new(0.0),
            scale: Cell::new(1.0),
            animating: Cell::new(false),
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityIndicator for Spinner {
    fn set_center(&self, center: Point) {
        self.center.set(center);
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }

    fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
    }

    fn start_animating(&self) {
        self.animating.set(true);
    }
}
