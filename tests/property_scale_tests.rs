use gantt_rs::core::{LinearScale, TimeScale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn time_scale_round_trip_property(
        time_start in 1.0e12f64..2.0e12,
        time_span in 1.0f64..1.0e10,
        value_factor in 0.0f64..1.0,
        width in 1.0f64..4_000.0
    ) {
        let time_end = time_start + time_span;
        let value = time_start + value_factor * time_span;
        let scale = TimeScale::new((time_start, time_end), width).expect("valid scale");

        let px = scale.time_to_pixel(value);
        let recovered = scale.pixel_to_time(px);

        // within one millisecond after the f64 round trip
        prop_assert!((recovered - value).abs() <= 1.0);
    }

    #[test]
    fn time_scale_is_monotonic_property(
        time_start in 0.0f64..1.0e12,
        time_span in 1.0f64..1.0e10,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let scale = TimeScale::new((time_start, time_start + time_span), 750.0)
            .expect("valid scale");
        let (lo, hi) = (a.min(b), a.max(b));
        let px_lo = scale.time_to_pixel(time_start + lo * time_span);
        let px_hi = scale.time_to_pixel(time_start + hi * time_span);
        prop_assert!(px_lo <= px_hi);
    }

    #[test]
    fn degenerate_domain_maps_everything_to_range_start(
        instant in 0.0f64..1.0e12,
        probe in -1.0e12f64..1.0e12,
        pixel in -1_000.0f64..1_000.0
    ) {
        let scale = TimeScale::new((instant, instant), 750.0).expect("degenerate scale");
        prop_assert!(scale.is_degenerate());
        prop_assert_eq!(scale.time_to_pixel(probe), 0.0);
        prop_assert_eq!(scale.pixel_to_time(pixel), instant);
    }

    #[test]
    fn linear_scale_inverse_property(
        domain_start in -1.0e6f64..1.0e6,
        domain_span in 0.001f64..1.0e6,
        value_factor in 0.0f64..1.0
    ) {
        let scale = LinearScale::new((domain_start, domain_start + domain_span), (0.0, 2_048.0))
            .expect("valid scale");
        let value = domain_start + value_factor * domain_span;
        let recovered = scale.invert(scale.apply(value));
        prop_assert!((recovered - value).abs() <= 1e-7);
    }
}
