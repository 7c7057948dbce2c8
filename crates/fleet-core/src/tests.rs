//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DemandId, DroneId, TruckId};

    #[test]
    fn index_roundtrip() {
        let id = DroneId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DroneId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(DroneId(0) < DroneId(1));
        assert!(TruckId(100) > TruckId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(DroneId::INVALID.0, u32::MAX);
        assert_eq!(TruckId::INVALID.0, u32::MAX);
        assert_eq!(DemandId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(DroneId(7).to_string(), "DroneId(7)");
    }
}

#[cfg(test)]
mod vec3 {
    use crate::Vec3;
    use crate::vec3::mean;

    #[test]
    fn length_and_distance() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vec3::ZERO.distance(v), 5.0);
        assert_eq!(v.length_sq(), 25.0);
    }

    #[test]
    fn normalized_unit_length() {
        let v = Vec3::new(10.0, -5.0, 2.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn normalized_zero_is_safe() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn horizontal_zeroes_y() {
        let v = Vec3::new(1.0, 2.0, 3.0).horizontal();
        assert_eq!(v, Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn mean_of_points() {
        let pts = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0)];
        assert_eq!(mean(&pts), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mean(&[]), Vec3::ZERO);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.02);
        assert_eq!(clock.elapsed_secs(), 0.0);
        for _ in 0..50 {
            clock.advance();
        }
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.02);
        assert_eq!(clock.ticks_for_secs(1.0), 50);
        assert_eq!(clock.ticks_for_secs(0.03), 2);
        assert_eq!(clock.ticks_for_secs(0.0), 0);
    }

    #[test]
    fn deadline_is_absolute() {
        let mut clock = SimClock::new(1.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.deadline(3.0), Tick(5));
    }
}

#[cfg(test)]
mod rng {
    use crate::{DroneId, DroneRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = DroneRng::new(12345, DroneId(0));
        let mut r2 = DroneRng::new(12345, DroneId(0));
        for _ in 0..100 {
            let a: f32 = r1.gen_range(0.0..1.0);
            let b: f32 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_drones_differ() {
        let mut r0 = DroneRng::new(1, DroneId(0));
        let mut r1 = DroneRng::new(1, DroneId(1));
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b, "seeds for adjacent drones should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = DroneRng::new(0, DroneId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f32..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn children_are_independent() {
        let mut root = SimRng::new(7);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let va: u64 = a.gen_range(0..u64::MAX);
        let vb: u64 = b.gen_range(0..u64::MAX);
        assert_ne!(va, vb);
    }

    #[test]
    fn shuffle_preserves_elements() {
        let mut rng = SimRng::new(3);
        let mut v: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod params {
    use crate::{Method, SimParams};

    #[test]
    fn default_total_trials() {
        let p = SimParams::default();
        assert_eq!(p.total_trials(), 2 * 5 * 5 * 15);
    }

    #[test]
    fn method_labels() {
        assert_eq!(Method::Centroid.label(), "KMeans");
        assert_eq!(Method::Random.label(), "Random");
    }

    #[test]
    fn validate_rejects_empty_sweep() {
        let p = SimParams { demand_counts: vec![], ..SimParams::default() };
        assert!(p.validate().is_err());

        let p = SimParams { truck_counts: vec![0], ..SimParams::default() };
        assert!(p.validate().is_err());

        let p = SimParams { number_of_runs: 0, ..SimParams::default() };
        assert!(p.validate().is_err());

        assert!(SimParams::default().validate().is_ok());
    }
}
