//! Tests for color distance, alpha compositing and transparency checks

#[cfg(test)]
mod tests {
    use trufflify::math::color::{blend_over, color_distance_squared, is_transparent};

    // Tests distance is the sum of squared RGB differences
    // Verified by summing absolute differences instead
    #[test]
    fn test_color_distance_squared_sums_channel_squares() {
        assert_eq!(color_distance_squared([10, 20, 30, 255], [10, 20, 30, 255]), 0);
        assert_eq!(color_distance_squared([0, 0, 0, 255], [255, 255, 255, 255]), 195_075);
        assert_eq!(color_distance_squared([13, 0, 0, 255], [10, 4, 0, 255]), 9 + 16);
    }

    // Tests alpha does not contribute to distance and order does not matter
    // Verified by including the alpha channel in the sum
    #[test]
    fn test_color_distance_squared_ignores_alpha_and_is_symmetric() {
        assert_eq!(color_distance_squared([5, 6, 7, 0], [5, 6, 7, 255]), 0);
        assert_eq!(
            color_distance_squared([200, 3, 90, 10], [1, 250, 40, 90]),
            color_distance_squared([1, 250, 40, 90], [200, 3, 90, 10])
        );
    }

    // Tests blend uses truncating integer arithmetic and forces opaque output
    // Verified by rounding instead of truncating
    #[test]
    fn test_blend_over_matches_truncated_formula() {
        let blended = blend_over([200, 100, 0, 100], [50, 50, 50, 255]);
        assert_eq!(blended, [108, 69, 30, 255]);
    }

    // Tests blend formula across a spread of inputs
    // Verified by swapping patch and base weights
    #[test]
    fn test_blend_over_formula_across_inputs() {
        for alpha in [1u8, 64, 100, 200, 254] {
            for patch in [0u8, 17, 128, 255] {
                for base in [0u8, 99, 255] {
                    let a = u32::from(alpha);
                    let expected =
                        ((a * u32::from(patch) + (255 - a) * u32::from(base)) / 255) as u8;
                    let blended = blend_over([patch, patch, patch, alpha], [base, base, base, 7]);
                    assert_eq!(blended, [expected, expected, expected, 255]);
                }
            }
        }
    }

    // Tests only zero alpha counts as transparent
    // Verified by treating low alpha as transparent
    #[test]
    fn test_is_transparent() {
        assert!(is_transparent([255, 255, 255, 0]));
        assert!(!is_transparent([0, 0, 0, 1]));
        assert!(!is_transparent([0, 0, 0, 255]));
    }
}
