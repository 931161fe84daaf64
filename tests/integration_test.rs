//! End-to-end pipeline tests: catalog -> generator -> indicators -> summaries.

mod common;

use common::*;
use marketdash::domain::analytics::SeriesStats;
use marketdash::domain::dashboard::{DashboardState, MarketContext};
use marketdash::domain::generator::{generate_series, is_trading_day, MIN_VOLUME};
use marketdash::domain::indicator::{classify_signal, compute_rsi, moving_average, Signal};
use marketdash::domain::market::{
    build_heatmap, summarize_all, HeatmapMode, SummaryOptions, HEATMAP_MAX, HEATMAP_MIN,
};
use marketdash::domain::security::{Catalog, Sector};
use proptest::prelude::*;

mod series_generation {
    use super::*;

    #[test]
    fn reliance_five_candles_start_from_base_price() {
        let catalog = Catalog::large_cap();
        let mut rng = seeded(2850);
        let candles = generate_series(&mut rng, &catalog, "RELIANCE", 5, anchor()).unwrap();

        assert_eq!(candles.len(), 5);
        let first_open = candles[0].open;
        assert!(
            (first_open - 2850.0).abs() <= 2850.0 * 0.0025 + 0.01,
            "first open {} too far from base",
            first_open
        );
        for pair in candles.windows(2) {
            let gap = (pair[1].open - pair[0].close).abs();
            assert!(gap <= pair[0].close * 0.0025 + 0.01, "gap {} too wide", gap);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let catalog = Catalog::large_cap();
        let a = generate_series(&mut seeded(9), &catalog, "TCS", 60, anchor()).unwrap();
        let b = generate_series(&mut seeded(9), &catalog, "TCS", 60, anchor()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_symbol_walks_from_fallback_price() {
        let catalog = Catalog::large_cap();
        let candles = generate_series(&mut seeded(3), &catalog, "ZZZ", 1, anchor()).unwrap();
        assert!((candles[0].open - 1000.0).abs() <= 1000.0 * 0.0025 + 0.01);
    }

    #[test]
    fn zero_count_is_rejected() {
        let catalog = Catalog::large_cap();
        assert!(generate_series(&mut seeded(1), &catalog, "TCS", 0, anchor()).is_err());
    }

    #[test]
    fn long_series_skips_weekends() {
        let catalog = Catalog::large_cap();
        let candles = generate_series(&mut seeded(5), &catalog, "INFY", 200, anchor()).unwrap();
        assert_eq!(candles.len(), 200);
        assert!(candles.iter().all(|c| is_trading_day(c.date)));
        assert!(candles.windows(2).all(|w| w[0].date < w[1].date));
    }
}

mod indicator_pipeline {
    use super::*;

    #[test]
    fn moving_average_over_generated_series() {
        let catalog = Catalog::large_cap();
        let candles = generate_series(&mut seeded(11), &catalog, "SBIN", 40, anchor()).unwrap();
        let ma = moving_average(&candles, 20);

        assert_eq!(ma.len(), candles.len());
        assert!(ma[..19].iter().all(Option::is_none));
        for i in 19..candles.len() {
            let mean = candles[i - 19..=i].iter().map(|c| c.close).sum::<f64>() / 20.0;
            let value = ma[i].unwrap();
            assert!((value - mean).abs() <= 0.005 + 1e-9, "index {}: {} vs {}", i, value, mean);
        }
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes = [
            10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0,
            25.0,
        ];
        let candles = candles_from_closes(date(2024, 1, 1), &closes);
        assert_eq!(compute_rsi(&candles, 14), 100.0);
    }

    #[test]
    fn rsi_short_history_is_neutral() {
        let closes = [5.0, 50.0, 1.0, 80.0, 2.0, 90.0, 3.0, 70.0, 4.0, 60.0, 5.0, 40.0, 6.0, 30.0];
        let candles = candles_from_closes(date(2024, 1, 1), &closes);
        assert_eq!(compute_rsi(&candles, 14), 50.0);
    }

    #[test]
    fn signal_boundaries() {
        assert_eq!(classify_signal(35.0), Signal::Hold);
        assert_eq!(classify_signal(34.99), Signal::Buy);
        assert_eq!(classify_signal(65.0), Signal::Hold);
        assert_eq!(classify_signal(65.01), Signal::Sell);
    }

    #[test]
    fn stats_over_generated_series() {
        let catalog = Catalog::large_cap();
        let candles = generate_series(&mut seeded(12), &catalog, "LT", 30, anchor()).unwrap();
        let stats = SeriesStats::compute(&candles).unwrap();
        assert_eq!(stats.candle_count, 30);
        assert!(stats.range_high >= stats.week_high);
        assert!(stats.range_low <= stats.week_low);
        assert!(stats.avg_volume >= MIN_VOLUME as f64);
    }
}

mod market_overview {
    use super::*;

    #[test]
    fn summaries_follow_catalog_order() {
        let catalog = Catalog::large_cap();
        let summaries =
            summarize_all(&mut seeded(21), &catalog, anchor(), &SummaryOptions::default()).unwrap();

        assert_eq!(summaries.len(), catalog.len());
        for (summary, security) in summaries.iter().zip(catalog.securities()) {
            assert_eq!(summary.symbol, security.symbol);
            assert_eq!(summary.sector, security.sector);
            assert_eq!(summary.signal, classify_signal(summary.rsi));
            assert!((0.0..=100.0).contains(&summary.rsi));
        }
    }

    #[test]
    fn custom_catalog_summaries() {
        let catalog = small_catalog();
        let summaries =
            summarize_all(&mut seeded(22), &catalog, anchor(), &SummaryOptions::default()).unwrap();
        let symbols: Vec<_> = summaries.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ALPHA", "BETA", "GAMMA"]);
    }

    #[test]
    fn derived_heatmap_reflects_sector_moves() {
        let summaries = vec![
            make_summary("A", Sector::It, 1.0),
            make_summary("B", Sector::It, 2.0),
            make_summary("C", Sector::Pharma, -5.0),
        ];
        let entries = build_heatmap(&mut seeded(0), HeatmapMode::SectorChange, &summaries);
        assert_eq!(entries.len(), Sector::ALL.len());

        let value_of = |sector: Sector| entries.iter().find(|e| e.sector == sector).unwrap().value;
        assert_eq!(value_of(Sector::It), 1.5);
        assert_eq!(value_of(Sector::Pharma), HEATMAP_MIN);
        assert_eq!(value_of(Sector::Auto), 0.0);
    }

    #[test]
    fn random_heatmap_stays_in_range() {
        let entries = build_heatmap(&mut seeded(23), HeatmapMode::Random, &[]);
        assert_eq!(entries.len(), 11);
        for entry in entries {
            assert!(entry.value >= HEATMAP_MIN && entry.value <= HEATMAP_MAX);
        }
    }

    #[test]
    fn dashboard_round_trip() {
        let catalog = small_catalog();
        let ctx = MarketContext::new(&catalog, anchor());
        let mut rng = seeded(24);
        let mut state = DashboardState::new(&catalog);
        state.initialize(&mut rng, &ctx).unwrap();
        assert_eq!(state.selected_symbol, "ALPHA");

        state.select_symbol(&mut rng, &ctx, "GAMMA").unwrap();
        assert_eq!(state.selected_summary().unwrap().name, "Gamma Pharma");

        state.set_search_query("software");
        let visible: Vec<_> = state.visible_summaries().iter().map(|s| s.symbol.clone()).collect();
        assert_eq!(visible, vec!["BETA"]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_candles_are_consistent(seed in any::<u64>(), count in 1usize..250, idx in 0usize..20) {
        let catalog = Catalog::large_cap();
        let symbol = catalog.securities()[idx].symbol.clone();
        let candles = generate_series(&mut seeded(seed), &catalog, &symbol, count, anchor()).unwrap();

        prop_assert_eq!(candles.len(), count);
        for c in &candles {
            prop_assert!(c.low <= c.open.min(c.close));
            prop_assert!(c.high >= c.open.max(c.close));
            prop_assert!(c.low >= 1.0);
            prop_assert!(c.volume >= 200_000 && c.volume < 3_200_000);
            prop_assert!(is_trading_day(c.date));
        }
        for pair in candles.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn unknown_symbols_still_produce_count(seed in any::<u64>(), count in 1usize..60, symbol in "[A-Z]{3,8}") {
        let catalog = small_catalog();
        let candles = generate_series(&mut seeded(seed), &catalog, &symbol, count, anchor()).unwrap();
        prop_assert_eq!(candles.len(), count);
    }

    #[test]
    fn rsi_is_bounded(seed in any::<u64>(), count in 1usize..80, period in 1usize..30) {
        let catalog = Catalog::large_cap();
        let candles = generate_series(&mut seeded(seed), &catalog, "WIPRO", count, anchor()).unwrap();
        let rsi = compute_rsi(&candles, period);
        prop_assert!((0.0..=100.0).contains(&rsi));
        if count < period + 1 {
            prop_assert_eq!(rsi, 50.0);
        }
    }

    #[test]
    fn moving_average_shape(seed in any::<u64>(), count in 1usize..80, period in 1usize..40) {
        let catalog = Catalog::large_cap();
        let candles = generate_series(&mut seeded(seed), &catalog, "TITAN", count, anchor()).unwrap();
        let ma = moving_average(&candles, period);
        prop_assert_eq!(ma.len(), count);
        for (i, value) in ma.iter().enumerate() {
            prop_assert_eq!(value.is_some(), i + 1 >= period);
        }
    }

    #[test]
    fn signal_matches_thresholds(rsi in 0.0f64..=100.0) {
        let expected = if rsi < 35.0 {
            Signal::Buy
        } else if rsi > 65.0 {
            Signal::Sell
        } else {
            Signal::Hold
        };
        prop_assert_eq!(classify_signal(rsi), expected);
    }
}
