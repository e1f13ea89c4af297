/// Number of tissue compartments in the model.
pub const COMPARTMENTS: usize = 16;

/// Nitrogen-only ZH-L16 coefficients.
///
/// The `a` and `b` values are the published, empirically tuned table entries.
/// They are taken as-is rather than derived from the half-times.
pub struct ZhL16;

impl ZhL16 {
    // https://en.wikipedia.org/wiki/B%C3%BChlmann_decompression_algorithm#Versions
    pub const N2_HALF_LIFE: [f64; COMPARTMENTS] = [
        5.0, 8.0, 12.5, 18.5,
        27.0, 38.3, 54.3, 77.0,
        109.0, 146.0, 187.0, 239.0,
        305.0, 390.0, 498.0, 635.0,
    ];

    // a = 2 * (tht ** -1/3)
    pub const N2_A: [f64; COMPARTMENTS] = [
        1.1696, 1.0, 0.8618, 0.7562,
        0.62, 0.5043, 0.441, 0.4,
        0.375, 0.35, 0.3295, 0.3065,
        0.2835, 0.261, 0.248, 0.2327,
    ];

    // b = 1.005 - (tht ** -1/2)
    pub const N2_B: [f64; COMPARTMENTS] = [
        0.5578, 0.6514, 0.7222, 0.7825,
        0.8126, 0.8434, 0.8693, 0.8910,
        0.9092, 0.9222, 0.9319, 0.9403,
        0.9477, 0.9544, 0.9602, 0.9653,
    ];
}

#[test]
fn test_half_lives_ordered_fastest_first() {
    for i in 1..COMPARTMENTS {
        assert!(ZhL16::N2_HALF_LIFE[i] > ZhL16::N2_HALF_LIFE[i - 1]);
    }
    assert_eq!(ZhL16::N2_HALF_LIFE[0], 5.0);
    assert_eq!(ZhL16::N2_HALF_LIFE[15], 635.0);
}
