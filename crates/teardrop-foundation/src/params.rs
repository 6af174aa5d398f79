//! Per-frame stretch parameters derived from the scroll offset.

use crate::metrics::{clamp_percentage, ShapeMetrics};

/// Everything the shape builder needs for one frame, each dimension already
/// interpolated for the frame's stretch percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryParameters {
    /// Pull beyond the relaxed shape, before capping at `max_distance`.
    pub shift: f32,
    /// `min(max_distance, |shift|)`.
    pub distance: f32,
    /// `1 - distance / max_distance`, in `[0, 1]`.
    pub percentage: f32,
    pub top_padding: f32,
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub bottom_padding: f32,
    pub arrow_size: f32,
    pub arrow_radius: f32,
}

impl GeometryParameters {
    pub fn from_offset(offset: f32, metrics: &ShapeMetrics) -> Self {
        let shift = (-(metrics.rest_extent() + offset)).max(0.0);
        let distance = shift.abs().min(metrics.max_distance);
        let percentage = clamp_percentage(1.0 - distance / metrics.max_distance);
        Self::with_stretch(shift, distance, percentage, metrics)
    }

    /// Parameters for a given stretch percentage, as if the head had been
    /// pulled exactly that far.
    pub fn from_percentage(percentage: f32, metrics: &ShapeMetrics) -> Self {
        let percentage = clamp_percentage(percentage);
        let distance = (1.0 - percentage) * metrics.max_distance;
        Self::with_stretch(distance, distance, percentage, metrics)
    }

    fn with_stretch(shift: f32, distance: f32, percentage: f32, metrics: &ShapeMetrics) -> Self {
        Self {
            shift,
            distance,
            percentage,
            top_padding: metrics.top_padding.at(percentage),
            top_radius: metrics.top_radius.at(percentage),
            bottom_radius: metrics.bottom_radius.at(percentage),
            bottom_padding: metrics.bottom_padding.at(percentage),
            arrow_size: metrics.arrow_size.at(percentage),
            arrow_radius: metrics.arrow_radius.at(percentage),
        }
    }

    /// Undistorted shape: the head rests on the tail.
    pub fn is_relaxed(&self) -> bool {
        self.distance == 0.0
    }

    /// Stretch saturated: the trigger edge.
    pub fn is_saturated(&self) -> bool {
        self.percentage == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ShapeMetrics {
        ShapeMetrics::default()
    }

    #[test]
    fn resting_offsets_give_relaxed_shape() {
        for offset in [10.0, 0.0, -20.0, -43.0] {
            let params = GeometryParameters::from_offset(offset, &metrics());
            assert!(params.is_relaxed(), "offset {offset}");
            assert_eq!(params.percentage, 1.0, "offset {offset}");
            assert_eq!(params.top_radius, 16.0);
        }
    }

    #[test]
    fn distance_saturates_at_max_distance() {
        let at_trigger = GeometryParameters::from_offset(-96.0, &metrics());
        assert_eq!(at_trigger.distance, 53.0);
        assert!(at_trigger.is_saturated());

        let beyond = GeometryParameters::from_offset(-150.0, &metrics());
        assert_eq!(beyond.distance, 53.0);
        assert_eq!(beyond.shift, 107.0);
        assert_eq!(beyond.percentage, 0.0);
    }

    #[test]
    fn distance_zero_iff_percentage_one() {
        for step in 0..=200 {
            let offset = -(step as f32) * 0.75;
            let params = GeometryParameters::from_offset(offset, &metrics());
            assert_eq!(params.distance == 0.0, params.percentage == 1.0, "offset {offset}");
            assert_eq!(
                params.distance == metrics().max_distance,
                params.percentage == 0.0,
                "offset {offset}"
            );
        }
    }

    #[test]
    fn lerped_parameters_stay_in_bounds_and_monotonic() {
        let metrics = metrics();
        let mut previous: Option<GeometryParameters> = None;
        for step in 0..=100 {
            let params = GeometryParameters::from_percentage(step as f32 / 100.0, &metrics);
            assert!(metrics.top_padding.contains(params.top_padding));
            assert!(metrics.top_radius.contains(params.top_radius));
            assert!(metrics.bottom_radius.contains(params.bottom_radius));
            assert!(metrics.bottom_padding.contains(params.bottom_padding));
            assert!(metrics.arrow_size.contains(params.arrow_size));
            assert!(metrics.arrow_radius.contains(params.arrow_radius));
            if let Some(previous) = previous {
                // Top padding shrinks as the shape relaxes; everything else grows.
                assert!(params.top_padding <= previous.top_padding);
                assert!(params.top_radius >= previous.top_radius);
                assert!(params.bottom_radius >= previous.bottom_radius);
                assert!(params.bottom_padding >= previous.bottom_padding);
                assert!(params.arrow_size >= previous.arrow_size);
                assert!(params.arrow_radius >= previous.arrow_radius);
            }
            previous = Some(params);
        }
    }

    #[test]
    fn out_of_range_percentage_is_clamped() {
        let low = GeometryParameters::from_percentage(-3.0, &metrics());
        let high = GeometryParameters::from_percentage(4.0, &metrics());
        let nan = GeometryParameters::from_percentage(f32::NAN, &metrics());
        assert_eq!(low.percentage, 0.0);
        assert_eq!(high.percentage, 1.0);
        assert_eq!(nan.percentage, 1.0);
        assert_eq!(low.bottom_radius, 3.0);
        assert_eq!(high.bottom_radius, 16.0);
    }
}
