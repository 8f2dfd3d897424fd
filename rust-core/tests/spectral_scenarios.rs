use approx::assert_relative_eq;
use num_complex::Complex64;
use rustfft::FftPlanner;
use signal_complexity::spectrum::{fft, generate_window_by_name, power_spectrum};
use signal_complexity::{SpectralAnalyzer, SpectralConfig, SpectralConfigUpdate, WindowType};
use std::f64::consts::PI;

fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate).sin())
        .collect()
}

#[test]
fn short_sine_with_zero_padding() {
    let analyzer = SpectralAnalyzer::new(SpectralConfig {
        fft_size: 256,
        sample_rate: 1000.0,
        ..SpectralConfig::default()
    })
    .unwrap();

    let features = analyzer.analyze(&sine(50.0, 1000.0, 128));

    assert!((features.centroid - 50.0).abs() < 5.0, "centroid {}", features.centroid);
    assert!(features.energy > 0.0);
    assert!(features.bandwidth < 20.0, "bandwidth {}", features.bandwidth);
}

#[test]
fn dc_input_concentrates_in_first_bin() {
    let out = fft(&[Complex64::new(1.0, 0.0); 8]).unwrap();
    assert_relative_eq!(out[0].re, 8.0, epsilon = 1e-12);
    for c in &out[1..] {
        assert!(c.norm() < 1e-12);
    }

    let analyzer = SpectralAnalyzer::new(SpectralConfig {
        window_size: 8,
        window_type: WindowType::Rectangular,
        fft_size: 8,
        ..SpectralConfig::default()
    })
    .unwrap();
    let features = analyzer.analyze(&[1.0; 8]);
    assert_relative_eq!(features.fft[0].re, 8.0, epsilon = 1e-12);
    assert_eq!(features.centroid, 0.0);
    assert_relative_eq!(features.energy, 64.0, epsilon = 1e-9);
}

#[test]
fn power_spectrum_is_squared_magnitude() {
    let coefficients = [
        Complex64::new(4.0, 0.0),
        Complex64::new(3.0, 4.0),
        Complex64::new(0.0, -5.0),
        Complex64::new(1.0, 2.0),
    ];
    assert_eq!(power_spectrum(&coefficients), vec![16.0, 25.0, 25.0, 5.0]);
}

#[test]
fn bin_aligned_tones_land_on_their_bin() {
    let sample_rate = 1000.0;
    let fft_size = 256;
    let bin_width = sample_rate / fft_size as f64;
    let analyzer = SpectralAnalyzer::new(SpectralConfig {
        window_size: fft_size,
        window_type: WindowType::Hann,
        fft_size,
        sample_rate,
        overlap: 0.5,
    })
    .unwrap();

    for bin in [8usize, 20, 32, 64, 100] {
        let freq = bin as f64 * bin_width;
        let features = analyzer.analyze(&sine(freq, sample_rate, fft_size));
        assert!(
            (features.centroid - freq).abs() < bin_width,
            "bin {} centroid {}",
            bin,
            features.centroid
        );
        assert!(features.bandwidth < 5.0 * bin_width);
    }
}

#[test]
fn fft_matches_rustfft() {
    let mut planner = FftPlanner::<f64>::new();

    for size in [1usize, 2, 8, 64, 512] {
        let input: Vec<Complex64> = (0..size)
            .map(|i| {
                let t = i as f64;
                Complex64::new((0.37 * t).sin() + 0.1 * t, (1.3 * t).cos())
            })
            .collect();

        let ours = fft(&input).unwrap();

        let mut reference = input.clone();
        planner.plan_fft_forward(size).process(&mut reference);

        for (a, b) in ours.iter().zip(&reference) {
            assert!((a - b).norm() < 1e-9 * size as f64, "size {}: {} vs {}", size, a, b);
        }
    }
}

#[test]
fn rejects_non_power_of_two_sizes() {
    assert!(fft(&[Complex64::new(1.0, 0.0); 6]).is_err());
    assert!(fft(&[]).is_err());
    assert!(SpectralAnalyzer::new(SpectralConfig {
        fft_size: 1000,
        ..SpectralConfig::default()
    })
    .is_err());
}

#[test]
fn window_names_resolve() {
    assert_eq!(generate_window_by_name("triangle", 16), vec![1.0; 16]);
    assert_eq!(generate_window_by_name("hann", 1), vec![1.0]);
    assert!(generate_window_by_name("blackman", 0).is_empty());
}

#[test]
fn config_updates_from_json() {
    let mut analyzer = SpectralAnalyzer::new(SpectralConfig::default()).unwrap();
    let update: SpectralConfigUpdate =
        serde_json::from_str(r#"{"fft_size": 512, "window_type": "blackman"}"#).unwrap();
    analyzer.update_config(&update).unwrap();

    assert_eq!(analyzer.config().fft_size, 512);
    assert_eq!(analyzer.config().window_type, WindowType::Blackman);
    assert_eq!(analyzer.num_bins(), 256);
    assert_eq!(analyzer.analyze(&sine(50.0, 1000.0, 64)).fft.len(), 512);

    let bad: SpectralConfigUpdate = serde_json::from_str(r#"{"fft_size": 500}"#).unwrap();
    assert!(analyzer.update_config(&bad).is_err());
    assert_eq!(analyzer.config().fft_size, 512);
}

#[test]
fn features_serialize_to_json() {
    let analyzer = SpectralAnalyzer::new(SpectralConfig::default()).unwrap();
    let features = analyzer.analyze(&sine(50.0, 1000.0, 128));
    let json = serde_json::to_value(&features).unwrap();
    assert!(json["centroid"].is_number());
    assert_eq!(json["power_spectrum"].as_array().unwrap().len(), 256);
}
