//! End-to-end scenarios run through the public `FusionEngine` API, mirroring
//! the black-box style of the reference implementation's functional test
//! suite (build sensors, feed measurements cycle by cycle, assert on the
//! resulting track table) rather than exercising any single module.

use fusion_core::{FusionConfig, FusionEngine, FusionEvent, RawMeasurement, Sensor, SensorTransform, SensorType};

const FRONT_LEFT: usize = 0;
const FRONT_RIGHT: usize = 1;
const REAR_RIGHT: usize = 2;
const REAR_LEFT: usize = 3;

fn sensors() -> Vec<Sensor> {
    let make = |mounting: f32| Sensor {
        sensor_type: SensorType::Radar,
        transform: SensorTransform {
            can_x: 0.0,
            can_y: 0.0,
            x: 0.0,
            y: 0.0,
            mounting,
            fov: 140.0,
        },
    };
    vec![make(0.0), make(0.0), make(180.0), make(180.0)]
}

fn engine(capacity: usize) -> FusionEngine {
    FusionEngine::new(FusionConfig::default(), sensors(), capacity)
}

fn m(sensor_index: usize, pos_x: f32, pos_y: f32, vel_x: f32, vel_y: f32) -> RawMeasurement {
    RawMeasurement {
        sensor_index,
        pos_x,
        pos_y,
        vel_x,
        vel_y,
    }
}

#[test]
fn scenario_1_no_op() {
    let mut e = engine(16);
    e.run_cycle(&[]).unwrap();
    assert!(e.snapshot().iter().all(|t| t.id == 0));
}

#[test]
fn scenario_2_create() {
    let mut e = engine(16);
    let events = e.run_cycle(&[m(FRONT_LEFT, 4.0, 3.0, 10.0, 0.0)]).unwrap();

    let snap = e.snapshot();
    assert_eq!(snap[0].id, 1);
    assert!((snap[0].x - 4.0).abs() < 1e-5);
    assert!((snap[0].y - 3.0).abs() < 1e-5);
    assert!((snap[0].vx - 10.0).abs() < 1e-5);
    assert_eq!(snap[0].vy, 0.0);
    assert!(snap[1..].iter().all(|t| t.id == 0));
    assert!(events
        .iter()
        .any(|e| matches!(e, FusionEvent::TrackCreated { slot: 0, id: 1 })));
}

#[test]
fn scenario_3_predict_one_step() {
    let mut e = engine(16);
    e.run_cycle(&[m(FRONT_LEFT, 4.0, 3.0, 10.0, 0.0)]).unwrap();
    e.run_cycle(&[]).unwrap();

    let snap = e.snapshot();
    assert!((snap[0].x - 4.4).abs() < 1e-3);
    assert_eq!(snap[0].y, 3.0);
    assert_eq!(snap[0].vx, 10.0);
    assert_eq!(snap[0].vy, 0.0);
}

#[test]
fn scenario_4_associate_and_fuse() {
    let mut e = engine(16);
    e.run_cycle(&[m(FRONT_LEFT, 4.0, 3.0, 10.0, 0.0)]).unwrap();
    e.run_cycle(&[m(FRONT_LEFT, 4.4, 3.0, 10.0, 0.0)]).unwrap();

    let live: Vec<_> = e.snapshot().into_iter().filter(|t| t.id != 0).collect();
    assert_eq!(live.len(), 1);
    assert!((live[0].x - 4.4).abs() < 0.2);
    assert!((live[0].y - 3.0).abs() < 0.2);
}

#[test]
fn scenario_5_reject_association() {
    let mut e = engine(16);
    e.run_cycle(&[m(FRONT_LEFT, 4.0, 3.0, 10.0, 0.0)]).unwrap();
    e.run_cycle(&[m(REAR_LEFT, -4.0, 3.0, 10.0, 0.0)]).unwrap();

    let snap = e.snapshot();
    assert_eq!(snap[0].id, 1);
    assert_eq!(snap[1].id, 2);
    assert!((snap[1].x - (-4.0)).abs() < 1e-5);
}

#[test]
fn scenario_6_priority_replacement() {
    let k = 16;
    let mut e = engine(k);

    let cycle_a: Vec<_> = (0..(k - 1))
        .map(|i| m(FRONT_LEFT, i as f32 * 10.0, 3.0, 10.0, 0.0))
        .collect();
    e.run_cycle(&cycle_a).unwrap();
    assert_eq!(
        e.snapshot().iter().filter(|t| t.id != 0).count(),
        k - 1
    );

    let mut cycle_b = cycle_a.clone();
    cycle_b.push(m(FRONT_RIGHT, 5.0, 20.0, 10.0, 0.0));
    e.run_cycle(&cycle_b).unwrap();

    let live_count = e.snapshot().iter().filter(|t| t.id != 0).count();
    assert_eq!(live_count, k);
}

// Two measurements that land inside the same acceptance gate in one cycle
// fuse into a single track rather than spawning a duplicate — association
// sees a track it just created earlier in the same update loop. This is
// the scenario the reference system's own functional suite exercises
// (`associateDoubleObjectsDifferentSensors`); the case spec.md's "two live
// tracks with identical X" law actually describes — tracks that already
// existed independently before converging — is covered directly against
// `store::prune_duplicates` in `src/store.rs`, since the public engine API
// gives every in-cycle duplicate a chance to associate first.
#[test]
fn scenario_7_same_cycle_duplicates_fuse_instead_of_spawning() {
    let mut e = engine(16);
    e.run_cycle(&[m(FRONT_LEFT, -1.9, 3.0, 10.0, 0.0)]).unwrap();
    assert_eq!(e.snapshot()[0].id, 1);

    e.run_cycle(&[
        m(FRONT_LEFT, -1.5, 3.0, 10.0, 0.0),
        m(REAR_LEFT, -1.5, 3.0, 10.0, 0.0),
    ])
    .unwrap();

    let snap = e.snapshot();
    assert_eq!(snap[0].id, 1);
    assert!((snap[0].x - (-1.5)).abs() < 1e-4);
    assert_eq!(snap[1].id, 0);
}

#[test]
fn scenario_8_coasting_to_death() {
    let config = FusionConfig::default();
    let mut e = engine(16);
    e.run_cycle(&[m(FRONT_LEFT, 4.0, 3.0, 10.0, 0.0)]).unwrap();

    for _ in 0..config.max_coasting_cycles {
        e.run_cycle(&[]).unwrap();
        assert_eq!(e.snapshot()[0].id, 1);
    }

    e.run_cycle(&[]).unwrap();
    assert_eq!(e.snapshot()[0].id, 0);
}

#[test]
fn unused_sensor_constants_cover_all_four_mounting_directions() {
    let s = sensors();
    assert_eq!(s[FRONT_LEFT].transform.mounting, 0.0);
    assert_eq!(s[FRONT_RIGHT].transform.mounting, 0.0);
    assert_eq!(s[REAR_RIGHT].transform.mounting, 180.0);
    assert_eq!(s[REAR_LEFT].transform.mounting, 180.0);
}
