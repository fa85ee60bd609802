//! Unit tests for fa-core primitives.

#[cfg(test)]
mod ids {
    use crate::AircraftId;

    #[test]
    fn index_roundtrip() {
        let id = AircraftId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AircraftId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_follows_assignment() {
        assert!(AircraftId(0) < AircraftId(1));
    }

    #[test]
    fn display() {
        assert_eq!(AircraftId(7).to_string(), "AC0007");
    }
}

#[cfg(test)]
mod time {
    use crate::{ConfigError, SimClock, Tick, parse_hhmm};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(5)), 0);
        assert_eq!(Tick(u64::MAX - 1).saturating_add(5), Tick(u64::MAX));
    }

    #[test]
    fn clock_runs_to_horizon() {
        let mut clock = SimClock::new(3);
        assert_eq!(clock.now(), Tick::ZERO);
        assert_eq!(clock.remaining(), 3);
        for _ in 0..3 {
            assert!(!clock.is_finished());
            clock.advance();
        }
        assert!(clock.is_finished());
        assert_eq!(clock.now(), clock.horizon());
    }

    #[test]
    fn clock_display_uses_day_start() {
        let mut clock = SimClock::new(1080).with_day_start(360);
        for _ in 0..75 {
            clock.advance();
        }
        assert_eq!(clock.to_string(), "T75 (07:15)");
    }

    #[test]
    fn clock_time_wraps_at_midnight() {
        let clock = SimClock::new(2000).with_day_start(23 * 60);
        assert_eq!(clock.clock_time(Tick(90)), (0, 30));
    }

    #[test]
    fn clock_time_never_overflows() {
        let clock = SimClock::new(10).with_day_start(u64::MAX);
        let (h, m) = clock.clock_time(Tick(u64::MAX));
        assert!(h < 24 && m < 60);
    }

    #[test]
    fn parses_hhmm() {
        assert_eq!(parse_hhmm("00:00").unwrap(), 0);
        assert_eq!(parse_hhmm("12:00").unwrap(), 720);
        assert_eq!(parse_hhmm(" 6:05 ").unwrap(), 365);
    }

    #[test]
    fn rejects_malformed_hhmm() {
        for bad in ["", "12", "12:", "24:00", "12:60", "ab:cd", "12:5", "-1:00"] {
            assert!(
                matches!(parse_hhmm(bad), Err(ConfigError::MalformedClockTime(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}

#[cfg(test)]
mod rng {
    use rand_distr::Poisson;

    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let dist = Poisson::new(1.5).unwrap();
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let xs: Vec<u64> = (0..50).map(|_| a.poisson(&dist)).collect();
        let ys: Vec<u64> = (0..50).map(|_| b.poisson(&dist)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(1);
        assert!((0..100).all(|_| !rng.gen_bool(0.0)));
        assert!((0..100).all(|_| rng.gen_bool(1.0)));
    }

    #[test]
    fn replication_seeds_are_consecutive() {
        assert_eq!(SimRng::replication_seed(100, 0), 100);
        assert_eq!(SimRng::replication_seed(100, 3), 103);
        assert_eq!(SimRng::replication_seed(u64::MAX, 1), 0);
    }
}

#[cfg(test)]
mod config {
    use crate::config::{DEFAULT_GO_AROUND_PROBABILITY, MAX_HORIZON_TICKS, hours};
    use crate::{ArrivalProcess, ClosureSpec, ConfigError, RunConfig};

    #[test]
    fn default_is_valid() {
        let cfg = RunConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.horizon_ticks, 1080);
        assert_eq!(cfg.reentry.min_gap_ticks, 10);
    }

    #[test]
    fn calm_runs_never_go_around() {
        let mut cfg = RunConfig::default();
        assert_eq!(cfg.effective_go_around_probability(), 0.0);
        cfg.windy = true;
        assert_eq!(cfg.effective_go_around_probability(), DEFAULT_GO_AROUND_PROBABILITY);
    }

    #[test]
    fn rejects_negative_rate() {
        let cfg = RunConfig { arrival_rate: -0.1, ..RunConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidArrivalRate(-0.1)));
    }

    #[test]
    fn rejects_nan_rate() {
        let cfg = RunConfig { arrival_rate: f64::NAN, ..RunConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidArrivalRate(_))));
    }

    #[test]
    fn zero_rate_is_valid() {
        let cfg = RunConfig { arrival_rate: 0.0, ..RunConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bernoulli_rate_bounded_by_one() {
        let cfg = RunConfig {
            arrival_rate: 1.5,
            arrival_process: ArrivalProcess::Bernoulli,
            ..RunConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::BernoulliRateAboveOne(1.5)));
    }

    #[test]
    fn rejects_zero_horizon() {
        let cfg = RunConfig { horizon_ticks: 0, ..RunConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroHorizon));
    }

    #[test]
    fn rejects_horizon_past_limit() {
        let cfg = RunConfig { horizon_ticks: u64::MAX, ..RunConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::HorizonTooLong { ticks: u64::MAX, max: MAX_HORIZON_TICKS })
        );
        let longest = RunConfig { horizon_ticks: MAX_HORIZON_TICKS, ..RunConfig::default() };
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn hours_saturate() {
        assert_eq!(hours(2), 120);
        assert_eq!(hours(u64::MAX), u64::MAX);
        let cfg = RunConfig { horizon_ticks: hours(u64::MAX), ..RunConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::HorizonTooLong { .. })));
    }

    #[test]
    fn rejects_day_start_past_midnight() {
        let cfg = RunConfig { day_start_minute: 24 * 60, ..RunConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDayStart(1440)));
    }

    #[test]
    fn rejects_closure_end_overflow() {
        let spec = ClosureSpec::new(5, u64::MAX);
        assert_eq!(spec.end_tick(), u64::MAX);
        let cfg = RunConfig { closures: vec![spec], ..RunConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ClosureOverflow { start: 5, duration: u64::MAX })
        );

        let pair = RunConfig {
            closures: vec![ClosureSpec::new(10, u64::MAX - 10), ClosureSpec::new(20, 5)],
            ..RunConfig::default()
        };
        assert!(matches!(pair.validate(), Err(ConfigError::OverlappingClosures { .. })));
    }

    #[test]
    fn rejects_bad_probability() {
        let cfg = RunConfig { go_around_probability: 1.2, ..RunConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidProbability(1.2)));
    }

    #[test]
    fn rejects_empty_and_late_closures() {
        let empty = RunConfig { closures: vec![ClosureSpec::new(10, 0)], ..RunConfig::default() };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyClosure { start: 10 }));

        let late = RunConfig {
            horizon_ticks: hours(1),
            closures: vec![ClosureSpec::new(60, 5)],
            ..RunConfig::default()
        };
        assert_eq!(
            late.validate(),
            Err(ConfigError::ClosureOutsideHorizon { start: 60, horizon: 60 })
        );
    }

    #[test]
    fn rejects_overlapping_closures_in_any_order() {
        let cfg = RunConfig {
            closures: vec![ClosureSpec::new(130, 10), ClosureSpec::new(120, 30)],
            ..RunConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::OverlappingClosures { .. })));
    }

    #[test]
    fn adjacent_closures_are_fine() {
        let cfg = RunConfig {
            closures: vec![ClosureSpec::new(150, 10), ClosureSpec::new(120, 30)],
            ..RunConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.sorted_closures()[0].start_tick, 120);
    }

    #[test]
    fn closure_from_clock_time() {
        let c = ClosureSpec::at_clock_time("12:00", 360, 30).unwrap();
        assert_eq!(c, ClosureSpec::new(360, 30));
        assert_eq!(c.end_tick(), 390);
    }

    #[test]
    fn closure_before_day_start_rejected() {
        let err = ClosureSpec::at_clock_time("05:30", 360, 30).unwrap_err();
        assert!(matches!(err, ConfigError::ClosureBeforeDayStart { .. }));
    }
}
