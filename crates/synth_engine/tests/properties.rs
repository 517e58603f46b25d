//! Property-based tests for path and metric bounds over random valid configs.

use proptest::prelude::*;
use synth_core::config::SimulationConfig;
use synth_engine::metrics::{MetricsCalculator, TradingConvention};
use synth_engine::path::PathGenerator;

prop_compose! {
    fn valid_config()(
        seed in any::<u64>(),
        num_steps in 1usize..200,
        dt in 0.01f64..2.0,
        level in 1.0f64..500.0,
        offset in -0.5f64..0.5,
        rate in 0.0f64..2.0,
        damping in 0.0f64..0.99,
        noise in 0.0f64..50.0,
        jump in 0.01f64..20.0,
        floor_frac in 0.001f64..0.5,
    ) -> SimulationConfig {
        let initial = level * (1.0 + offset);
        SimulationConfig::builder()
            .seed(seed)
            .num_steps(num_steps)
            .dt(dt)
            .initial_price(initial)
            .mean_reversion_level(level)
            .mean_reversion_rate(rate)
            .momentum_damping(damping)
            .noise_scale(noise)
            .max_step_jump(jump)
            .price_floor(initial * floor_frac)
            .build()
            .unwrap()
    }
}

prop_compose! {
    /// Noise-free configs starting at the equilibrium level.
    fn calm_config()(
        seed in any::<u64>(),
        num_steps in 1usize..200,
        dt in 0.01f64..2.0,
        level in 1.0f64..500.0,
        rate in 0.0f64..2.0,
        damping in 0.0f64..0.99,
        jump in 0.01f64..20.0,
        floor_frac in 0.001f64..0.5,
    ) -> SimulationConfig {
        SimulationConfig::builder()
            .seed(seed)
            .num_steps(num_steps)
            .dt(dt)
            .initial_price(level)
            .mean_reversion_level(level)
            .mean_reversion_rate(rate)
            .momentum_damping(damping)
            .noise_scale(0.0)
            .max_step_jump(jump)
            .price_floor(level * floor_frac)
            .build()
            .unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_guardrails_hold(config in valid_config(), path_index in 0u64..1_000) {
        let completed = PathGenerator::new(&config, path_index).run().unwrap();
        let path = completed.path();

        prop_assert_eq!(path.len(), config.num_steps() + 1);
        for (i, state) in path.states().iter().enumerate() {
            prop_assert_eq!(state.step_index, i);
            prop_assert!(state.is_finite());
            prop_assert!(state.price >= config.price_floor());
        }
        for w in path.states().windows(2) {
            prop_assert!((w[1].price - w[0].price).abs() <= config.max_step_jump());
        }
    }

    #[test]
    fn prop_metrics_bounds(config in valid_config(), path_index in 0u64..1_000) {
        let completed = PathGenerator::new(&config, path_index).run().unwrap();
        let calc = MetricsCalculator::from_config(&config, TradingConvention::default());
        let metrics = calc.compute(completed.path()).unwrap();

        prop_assert_eq!(metrics.log_returns.len(), config.num_steps());
        prop_assert!(metrics.annualized_volatility >= 0.0);
        prop_assert!(metrics.annualized_volatility.is_finite());
        prop_assert!((0.0..=1.0).contains(&metrics.max_drawdown));
        prop_assert_eq!(
            metrics.terminal_price,
            completed.path().terminal().map(|s| s.price).unwrap()
        );
    }

    #[test]
    fn prop_replay_is_identical(config in valid_config(), path_index in 0u64..1_000) {
        let a = PathGenerator::new(&config, path_index).run().unwrap();
        let b = PathGenerator::new(&config, path_index).run().unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_equilibrium_has_zero_volatility(config in calm_config(), path_index in 0u64..1_000) {
        let completed = PathGenerator::new(&config, path_index).run().unwrap();
        let calc = MetricsCalculator::from_config(&config, TradingConvention::default());
        let metrics = calc.compute(completed.path()).unwrap();

        prop_assert_eq!(metrics.log_returns.len(), config.num_steps());
        for r in &metrics.log_returns {
            prop_assert_eq!(*r, 0.0);
        }
        prop_assert_eq!(metrics.annualized_volatility, 0.0);
        prop_assert_eq!(metrics.max_drawdown, 0.0);
        prop_assert_eq!(metrics.terminal_price, config.initial_price());
    }
}
