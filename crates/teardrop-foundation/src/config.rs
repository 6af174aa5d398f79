//! Control configuration: shape metrics, layer styling, and animation timing.

use crate::error::ConfigError;
use crate::metrics::{ShapeMetrics, Span};
use teardrop_graphics::{Color, Orientation, Point};

/// Default body fill.
pub const DEFAULT_TINT: Color = Color::from_rgb_u8(155, 162, 172);

/// Static styling of the three indicator layers. Only the body tint can
/// change after the control is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorStyle {
    pub tint: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub shadow_color: Color,
    pub shadow_offset: Point,
    pub shadow_opacity: f32,
    pub shadow_radius: f32,
    pub arrow_fill: Color,
    pub highlight_fill: Color,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            tint: DEFAULT_TINT,
            stroke: Color::DARK_GRAY.with_alpha(0.5),
            stroke_width: 0.5,
            shadow_color: Color::BLACK,
            shadow_offset: Point::new(0.0, 1.0),
            shadow_opacity: 0.4,
            shadow_radius: 0.5,
            arrow_fill: Color::WHITE,
            highlight_fill: Color::WHITE.with_alpha(0.2),
        }
    }
}

/// Durations (milliseconds) of the trigger and end-of-refresh animations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissalTiming {
    /// Body and shadow path morph into the closed lens.
    pub morph_millis: u64,
    /// Opacity fade of each layer.
    pub fade_millis: u64,
    /// Start of the body fade. Defaults to the morph duration so the morph
    /// stays visible; applies to both orientations.
    pub body_fade_delay_millis: u64,
    /// Activity indicator scale-in.
    pub activity_scale_in_millis: u64,
    pub activity_delay_millis: u64,
    /// Scale the activity indicator grows from and shrinks back to.
    pub activity_initial_scale: f32,
    /// Inset restore and activity fade-out after the refresh ends.
    pub end_refreshing_millis: u64,
}

impl Default for DismissalTiming {
    fn default() -> Self {
        Self {
            morph_millis: 150,
            fade_millis: 100,
            body_fade_delay_millis: 150,
            activity_scale_in_millis: 200,
            activity_delay_millis: 150,
            activity_initial_scale: 0.1,
            end_refreshing_millis: 400,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RefreshConfig {
    pub orientation: Orientation,
    pub metrics: ShapeMetrics,
    pub style: IndicatorStyle,
    pub timing: DismissalTiming,
}

impl RefreshConfig {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self::default().with_orientation(Orientation::Horizontal)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_metrics(mut self, metrics: ShapeMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_style(mut self, style: IndicatorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_timing(mut self, timing: DismissalTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.style.tint = tint;
        self
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let metrics = &self.metrics;
        let spans = [
            ("top_padding", metrics.top_padding),
            ("top_radius", metrics.top_radius),
            ("bottom_radius", metrics.bottom_radius),
            ("bottom_padding", metrics.bottom_padding),
            ("arrow_size", metrics.arrow_size),
            ("arrow_radius", metrics.arrow_radius),
        ];
        for (name, span) in spans {
            check_span(name, span)?;
        }

        let scalars = [
            ("max_distance", metrics.max_distance),
            ("total_extent", metrics.total_extent),
            ("opened_extent", metrics.opened_extent),
            ("highlight_shift", metrics.highlight_shift),
            ("closed_radius_fraction", metrics.closed_radius_fraction),
            ("activity_initial_scale", self.timing.activity_initial_scale),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if metrics.max_distance <= 0.0 {
            return Err(ConfigError::NonPositiveMaxDistance(metrics.max_distance));
        }
        if metrics.opened_extent <= 0.0 || metrics.opened_extent >= metrics.total_extent {
            return Err(ConfigError::InvalidOpenedExtent {
                opened: metrics.opened_extent,
                total: metrics.total_extent,
            });
        }
        for (size, radius) in [
            (metrics.arrow_size.min, metrics.arrow_radius.min),
            (metrics.arrow_size.max, metrics.arrow_radius.max),
        ] {
            if size > 2.0 * radius {
                return Err(ConfigError::ArrowTooThick { size, radius });
            }
        }
        Ok(())
    }
}

fn check_span(name: &'static str, span: Span) -> Result<(), ConfigError> {
    for value in [span.min, span.max] {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { name, value });
        }
        if value < 0.0 {
            return Err(ConfigError::Negative { name, value });
        }
    }
    Ok(())
}
