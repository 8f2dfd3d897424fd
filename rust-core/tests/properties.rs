use num_complex::Complex64;
use proptest::prelude::*;
use signal_complexity::fractal::{DfaClassification, ScalePoint};
use signal_complexity::spectrum::{generate_window_by_name, power_spectrum};
use signal_complexity::{FractalAnalyzer, FractalConfig, SpectralAnalyzer, SpectralConfig};

fn samples(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3f64..1.0e3, 0..max_len)
}

/// Ordinary samples mixed with NaN, infinities and near-overflow magnitudes
fn hostile_samples(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    let sample = prop_oneof![
        6 => -1.0e3f64..1.0e3,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        2 => 1.0e299f64..1.0e300,
        2 => -1.0e300f64..-1.0e299,
        1 => prop_oneof![Just(f64::MAX), Just(f64::MIN)],
    ];
    prop::collection::vec(sample, 0..max_len)
}

fn curve_is_finite(curve: &[ScalePoint]) -> bool {
    curve.iter().all(|p| p.scale.is_finite() && p.measure.is_finite())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn spectral_features_are_finite(signal in samples(300)) {
        let analyzer = SpectralAnalyzer::new(SpectralConfig::default()).unwrap();
        let features = analyzer.analyze(&signal);

        prop_assert!(features.centroid.is_finite() && features.centroid >= 0.0);
        prop_assert!(features.bandwidth.is_finite() && features.bandwidth >= 0.0);
        prop_assert!(features.rolloff.is_finite() && features.rolloff >= 0.0);
        prop_assert!(features.energy.is_finite() && features.energy >= 0.0);
        prop_assert!(features.entropy.is_finite() && features.entropy >= 0.0);
        prop_assert_eq!(features.power_spectrum.len(), 256);
        prop_assert!(features.power_spectrum.iter().all(|p| p.is_finite() && *p >= 0.0));
    }

    #[test]
    fn centroid_stays_below_nyquist(signal in samples(300)) {
        let analyzer = SpectralAnalyzer::new(SpectralConfig::default()).unwrap();
        let features = analyzer.analyze(&signal);
        prop_assert!(features.centroid <= 500.0);
        prop_assert!(features.rolloff <= 500.0);
    }

    #[test]
    fn fractal_estimates_are_bounded(signal in samples(300)) {
        let analyzer = FractalAnalyzer::new(FractalConfig::default()).unwrap();
        let features = analyzer.analyze(&signal);

        prop_assert!(features.box_counting.dimension.is_finite());
        prop_assert!(features.correlation.dimension.is_finite());
        prop_assert!(features.correlation.dimension >= 0.0);
        prop_assert!((1.0..=2.0).contains(&features.higuchi.dimension));
        prop_assert!((0.0..=2.0).contains(&features.dfa.exponent));
        prop_assert!(features.complexity.average_dimension.is_finite());
        prop_assert!(features.complexity.dimension_variance >= 0.0);
    }

    #[test]
    fn dfa_classification_matches_exponent(signal in prop::collection::vec(-1.0f64..1.0, 16..200)) {
        let analyzer = FractalAnalyzer::new(FractalConfig::default()).unwrap();
        let dfa = analyzer.analyze(&signal).dfa;
        prop_assert_eq!(dfa.classification, DfaClassification::from_exponent(dfa.exponent));
    }

    #[test]
    fn windows_have_requested_length(name in "[a-z]{0,10}", len in 0usize..512) {
        let window = generate_window_by_name(&name, len);
        prop_assert_eq!(window.len(), len);
        prop_assert!(window.iter().all(|w| w.is_finite() && (-1e-12..=1.0 + 1e-12).contains(w)));
    }

    #[test]
    fn spectral_features_survive_anomalies(signal in hostile_samples(300)) {
        let analyzer = SpectralAnalyzer::new(SpectralConfig::default()).unwrap();
        let features = analyzer.analyze(&signal);

        for value in [
            features.centroid,
            features.bandwidth,
            features.rolloff,
            features.energy,
            features.entropy,
        ] {
            prop_assert!(value.is_finite() && value >= 0.0);
        }
        prop_assert!(features.fft.iter().all(|c| c.re.is_finite() && c.im.is_finite()));
        prop_assert!(features.power_spectrum.iter().all(|p| p.is_finite() && *p >= 0.0));
    }

    #[test]
    fn fractal_features_survive_anomalies(signal in hostile_samples(300)) {
        let analyzer = FractalAnalyzer::new(FractalConfig::default()).unwrap();
        let features = analyzer.analyze(&signal);

        prop_assert!(features.box_counting.dimension.is_finite());
        prop_assert!(features.correlation.dimension.is_finite());
        prop_assert!((1.0..=2.0).contains(&features.higuchi.dimension));
        prop_assert!((0.0..=2.0).contains(&features.dfa.exponent));
        prop_assert!(features.complexity.average_dimension.is_finite());
        prop_assert!(features.complexity.dimension_variance.is_finite());

        prop_assert!(curve_is_finite(&features.box_counting.curve));
        prop_assert!(curve_is_finite(&features.correlation.curve));
        prop_assert!(curve_is_finite(&features.higuchi.curve));
        prop_assert!(curve_is_finite(&features.dfa.curve));

        for r_squared in [
            features.box_counting.r_squared,
            features.correlation.r_squared,
            features.higuchi.r_squared,
            features.dfa.r_squared,
        ]
        .into_iter()
        .flatten()
        {
            prop_assert!(r_squared.is_finite());
        }
    }

    #[test]
    fn power_is_non_negative_for_any_coefficients(
        parts in prop::collection::vec((-1.0e150f64..1.0e150, -1.0e150f64..1.0e150), 0..128)
    ) {
        let coefficients: Vec<Complex64> =
            parts.into_iter().map(|(re, im)| Complex64::new(re, im)).collect();
        let power = power_spectrum(&coefficients);

        prop_assert_eq!(power.len(), coefficients.len());
        prop_assert!(power.iter().all(|p| p.is_finite() && *p >= 0.0));
    }
}
