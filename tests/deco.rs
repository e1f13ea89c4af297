use dive_planner_deco::ceiling::is_clear;
use dive_planner_deco::deco::{calculate_deco_stops, nearest_stop, DecoSchedule, STOP_LADDER};
use dive_planner_deco::pressure::{GasLoading, PressureConvention};
use dive_planner_deco::simulate::simulate;
use dive_planner_deco::{DecoError, ModelConfig, TissueState};

fn air() -> GasLoading {
    GasLoading::new(0.79, PressureConvention::Absolute)
}

#[test]
fn test_ladder_snapping() {
    for depth in STOP_LADDER {
        assert_eq!(nearest_stop(depth as f64), depth);
        assert_eq!(nearest_stop(depth as f64 - 0.5), depth);
    }
    assert_eq!(nearest_stop(12.5), 12);
    assert_eq!(nearest_stop(40.0), 12);
}

#[test]
fn test_no_decompression_dive() {
    let config = ModelConfig::default();
    let tissues = simulate(&air(), &config, 18.0, 10);
    let (schedule, _) = calculate_deco_stops(tissues, &air(), &config, 18.0).unwrap();
    assert_eq!(schedule, DecoSchedule::default());
}

#[test]
fn test_decompression_dive() {
    let config = ModelConfig::default();
    let tissues = simulate(&air(), &config, 40.0, 30);
    let (schedule, after) = calculate_deco_stops(tissues, &air(), &config, 40.0).unwrap();
    assert!(schedule.total_minutes() > 0);
    assert!(schedule.minutes_at(3) > 0);
    assert!(schedule.deepest_stop().unwrap() <= 12);
    assert!(is_clear(&after));
}

#[test]
fn test_deep_long_dive_is_clamped_to_ladder() {
    let config = ModelConfig::default();
    let tissues = simulate(&air(), &config, 60.0, 40);
    let (schedule, after) = calculate_deco_stops(tissues, &air(), &config, 60.0).unwrap();
    assert!(schedule.minutes_at(12) > 0);
    assert!(is_clear(&after));
}

#[test]
fn test_stops_get_shorter_toward_depth() {
    let config = ModelConfig::default();
    let tissues = simulate(&air(), &config, 45.0, 40);
    let (schedule, _) = calculate_deco_stops(tissues, &air(), &config, 45.0).unwrap();
    assert!(schedule.minutes_at(3) >= schedule.minutes_at(6));
    assert!(schedule.minutes_at(6) >= schedule.minutes_at(9));
}

#[test]
fn test_reference_convention_converges() {
    let gas = GasLoading::new(0.79, PressureConvention::Reference);
    let config = ModelConfig::with_convention(PressureConvention::Reference);
    let tissues = simulate(&gas, &config, 40.0, 30);
    let (schedule, after) = calculate_deco_stops(tissues, &gas, &config, 40.0).unwrap();
    assert!(schedule.total_minutes() > 0);
    assert!(is_clear(&after));
}

#[test]
fn test_stop_minute_cap() {
    let config = ModelConfig {
        max_stop_minutes: 3,
        ..ModelConfig::default()
    };
    let loaded = TissueState::from_loads([4.0; 16]);
    assert_eq!(
        calculate_deco_stops(loaded, &air(), &config, 50.0),
        Err(DecoError::NonConvergence)
    );
}

#[cfg(feature = "std")]
#[test]
fn test_export_schedule_csv() {
    use csv::Writer;

    let config = ModelConfig::default();
    let tissues = simulate(&air(), &config, 40.0, 30);
    let (schedule, _) = calculate_deco_stops(tissues, &air(), &config, 40.0).unwrap();
    let schedule = schedule.with_safety_stop(config.safety_stop_minutes);

    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record(["depth_m", "minutes"]).unwrap();
    for (depth, minutes) in schedule.iter().rev() {
        wtr.write_record([depth.to_string(), minutes.to_string()]).unwrap();
    }
    let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

    let mut lines = data.lines();
    assert_eq!(lines.next(), Some("depth_m,minutes"));
    assert!(lines.next().unwrap().starts_with("12,"));
    assert_eq!(data.lines().count(), 5);
    assert!(data.contains(&format!("3,{}", schedule.minutes_at(3))));
}
