//! Gain-scaled absolute frame differencing.
//!
//! The visible output of the whole system: per-sample absolute
//! difference between the current frame and a historical reference,
//! amplified by a gain factor and saturated to the sample range.

use crate::source::Frame;

/// Maximum representable sample value.
const MAX_SAMPLE: f32 = u8::MAX as f32;

/// Computes the gain-scaled absolute difference between two frames.
///
/// Without a reference the current frame passes through unchanged;
/// this covers the first ticks before the delay buffer has filled.
/// Otherwise each sample becomes `clamp(round(|c - r| * gain), 0,
/// 255)`, computed per channel. Subtraction happens in a widened
/// signed type before taking the absolute value, and the scaled result
/// saturates instead of wrapping.
///
/// A reference with mismatched dimensions also passes the current
/// frame through; a live parameter change must never abort the loop.
pub fn difference(current: &Frame, reference: Option<&Frame>, gain: f32) -> Frame {
    let reference = match reference {
        Some(reference) if reference.same_dimensions(current) => reference,
        Some(reference) => {
            tracing::warn!(
                "reference frame {:?} does not match current {:?}; passing through",
                reference,
                current
            );
            return current.clone();
        }
        None => return current.clone(),
    };

    let samples = current
        .samples()
        .iter()
        .zip(reference.samples().iter())
        .map(|(&c, &r)| scale_sample(c, r, gain))
        .collect();

    Frame::new(
        samples,
        current.width(),
        current.height(),
        current.channels(),
        current.sequence(),
    )
}

#[inline]
fn scale_sample(current: u8, reference: u8, gain: f32) -> u8 {
    let delta = (current as i16 - reference as i16).unsigned_abs() as f32;
    (delta * gain).round().clamp(0.0, MAX_SAMPLE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(samples: Vec<u8>, sequence: u64) -> Frame {
        let width = samples.len() as u32;
        Frame::new(samples, width, 1, 1, sequence)
    }

    #[test]
    fn test_pass_through_without_reference() {
        let current = frame(vec![7, 80, 255], 1);
        let out = difference(&current, None, 10.0);
        assert_eq!(out.samples(), current.samples());
        assert_eq!(out.sequence(), 1);
    }

    #[test]
    fn test_identical_frames_yield_zero() {
        let a = frame(vec![13, 200, 255, 0], 1);
        let b = frame(vec![13, 200, 255, 0], 2);
        let out = difference(&a, Some(&b), 25.0);
        assert!(out.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_symmetry() {
        let a = frame(vec![0, 10, 200, 255], 1);
        let b = frame(vec![255, 5, 180, 0], 2);
        let ab = difference(&a, Some(&b), 3.0);
        let ba = difference(&b, Some(&a), 3.0);
        assert_eq!(ab.samples(), ba.samples());
    }

    #[test]
    fn test_gain_scales_difference() {
        let a = frame(vec![110], 1);
        let b = frame(vec![100], 2);
        let out = difference(&a, Some(&b), 10.0);
        assert_eq!(out.samples(), &[100]);
    }

    #[test]
    fn test_saturates_at_max_exactly() {
        // Difference of 200 at gain 2 overflows u8; must clamp, not wrap.
        let a = frame(vec![200], 1);
        let b = frame(vec![0], 2);
        let out = difference(&a, Some(&b), 2.0);
        assert_eq!(out.samples(), &[255]);
    }

    #[test]
    fn test_widened_subtraction_handles_extremes() {
        let a = frame(vec![0], 1);
        let b = frame(vec![255], 2);
        let out = difference(&a, Some(&b), 1.0);
        assert_eq!(out.samples(), &[255]);
    }

    #[test]
    fn test_zero_gain_yields_black_frame() {
        let a = frame(vec![1, 2, 3, 4], 1);
        let b = frame(vec![200, 100, 50, 25], 2);
        let out = difference(&a, Some(&b), 0.0);
        assert_eq!(out.samples(), &[0, 0, 0, 0]);
        assert_eq!(out.width(), a.width());
        assert_eq!(out.height(), a.height());
    }

    #[test]
    fn test_fractional_gain_rounds() {
        let a = frame(vec![103], 1);
        let b = frame(vec![100], 2);
        let out = difference(&a, Some(&b), 0.5);
        assert_eq!(out.samples(), &[2]); // 1.5 rounds away from zero
    }

    #[test]
    fn test_mismatched_dimensions_pass_through() {
        let a = frame(vec![10, 20], 1);
        let b = Frame::new(vec![0; 9], 3, 3, 1, 2);
        let out = difference(&a, Some(&b), 5.0);
        assert_eq!(out.samples(), a.samples());
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in prop::collection::vec(any::<u8>(), 16),
                          b in prop::collection::vec(any::<u8>(), 16),
                          gain in 0.0f32..50.0) {
            let fa = frame(a, 1);
            let fb = frame(b, 2);
            let ab = difference(&fa, Some(&fb), gain);
            let ba = difference(&fb, Some(&fa), gain);
            prop_assert_eq!(ab.samples(), ba.samples());
        }

        #[test]
        fn prop_self_difference_is_zero(a in prop::collection::vec(any::<u8>(), 16),
                                        gain in 0.0f32..50.0) {
            let fa = frame(a.clone(), 1);
            let fb = frame(a, 2);
            let out = difference(&fa, Some(&fb), gain);
            prop_assert!(out.samples().iter().all(|&s| s == 0));
        }

        #[test]
        fn prop_output_saturates(c in any::<u8>(), r in any::<u8>(),
                                 gain in 0.0f32..50.0) {
            let out = difference(&frame(vec![c], 1), Some(&frame(vec![r], 2)), gain);
            let expected = ((c as i16 - r as i16).unsigned_abs() as f32 * gain).round();
            if expected > 255.0 {
                prop_assert_eq!(out.samples(), &[255u8]);
            } else {
                prop_assert_eq!(out.samples(), &[expected as u8]);
            }
        }
    }
}
