use scrolly_charts::core::{BandScale, LinearScale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn in_domain_values_map_inside_the_range(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        range_start in -5_000.0f64..5_000.0,
        range_span in -5_000.0f64..5_000.0,
        value_factor in 0.0f64..=1.0
    ) {
        let domain_end = domain_start + domain_span;
        let range_end = range_start + range_span;
        let value = (domain_start + value_factor * domain_span).min(domain_end);

        let scale = LinearScale::new(domain_start, domain_end)
            .and_then(|s| s.with_range(range_start, range_end))
            .expect("valid scale");
        let px = scale.domain_to_pixel(value).expect("to pixel");

        let (lo, hi) = if range_start <= range_end {
            (range_start, range_end)
        } else {
            (range_end, range_start)
        };
        prop_assert!(px >= lo - 1e-6 && px <= hi + 1e-6, "{px} outside [{lo}, {hi}]");
    }

    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let scale = LinearScale::new(domain_start, domain_end)
            .and_then(|s| s.with_range(1_024.0, 0.0))
            .expect("valid scale");
        let px = scale.domain_to_pixel(value).expect("to pixel");
        let recovered = scale.pixel_to_domain(px).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn bands_partition_the_range_for_any_category_order(
        categories in prop::collection::hash_set("[a-z]{1,8}", 1..40),
        shuffle_seed in any::<u64>(),
        padding_inner in 0.0f64..0.9,
        padding_outer in 0.0f64..1.0,
        width in 10.0f64..4_000.0
    ) {
        let mut names: Vec<String> = categories.into_iter().collect();
        // Deterministic permutation driven by the seed.
        names.sort_by_key(|name| {
            name.bytes()
                .fold(shuffle_seed, |acc, byte| acc.rotate_left(5) ^ u64::from(byte))
        });

        let scale = BandScale::new(names.clone())
            .and_then(|s| s.with_padding(padding_inner, padding_outer))
            .and_then(|s| s.with_range(0.0, width))
            .expect("valid band scale");

        let step = scale.step();
        let bandwidth = scale.bandwidth();
        let tolerance = 1e-9 * width;
        prop_assert!((bandwidth - step * (1.0 - padding_inner)).abs() <= tolerance);

        let starts: Vec<f64> = names
            .iter()
            .map(|name| scale.position(name).expect("position"))
            .collect();
        for pair in starts.windows(2) {
            // Consecutive bands never overlap; the gap is the inner padding.
            let gap = pair[1] - (pair[0] + bandwidth);
            prop_assert!(gap >= -tolerance);
            prop_assert!((gap - step * padding_inner).abs() <= tolerance);
        }
        let first = starts[0];
        let last_end = starts[starts.len() - 1] + bandwidth;
        prop_assert!(first >= -tolerance);
        prop_assert!(last_end <= width + tolerance);
        // Outer padding is split evenly between both ends.
        prop_assert!((first - (width - last_end)).abs() <= tolerance * 10.0);
    }
}
