//! # Fusion Core
//!
//! Multi-radar object-fusion core for automotive driver-assistance systems:
//! U-D factorized Kalman tracking, radar measurement statistics, gating and
//! association, and a fixed-capacity track store with priority-based
//! replacement, duplicate pruning, and a coasting/confirmation lifecycle.
//!
//! This crate has **zero I/O dependencies**. It consumes raw measurements
//! and a static sensor table, and produces a snapshot of tracked objects
//! plus a vector of lifecycle events — nothing else crosses its boundary.
//! CAN framing, the real-time scheduling harness that drives the cycle, and
//! the reconfiguration side channel are all out of scope; a caller owns
//! those and talks to this crate only through [`FusionEngine`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  engine   per-cycle predict → update → manage            │
//! │  ├── store         fixed-capacity track table            │
//! │  ├── association   measurement-to-track gating           │
//! │  ├── sensor         prefused-object (plot) builder        │
//! │  ├── track          per-object Kalman state               │
//! │  ├── kalman         U-D factorization, Thornton, Bierman  │
//! │  └── radar          range/bearing/similarity statistics   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fusion_core::{FusionConfig, FusionEngine, RawMeasurement, Sensor, SensorTransform, SensorType};
//!
//! let sensor = Sensor {
//!     sensor_type: SensorType::Radar,
//!     transform: SensorTransform { can_x: 0.0, can_y: 0.0, x: 0.0, y: 0.0, mounting: 0.0, fov: 140.0 },
//! };
//! let mut engine = FusionEngine::new(FusionConfig::default(), vec![sensor], 16);
//!
//! let events = engine
//!     .run_cycle(&[RawMeasurement { sensor_index: 0, pos_x: 4.0, pos_y: 3.0, vel_x: 10.0, vel_y: 0.0 }])
//!     .unwrap();
//! assert!(!events.is_empty());
//! assert_eq!(engine.snapshot()[0].id, 1);
//! ```

pub mod association;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod kalman;
pub mod radar;
pub mod sensor;
pub mod store;
pub mod track;

pub use config::FusionConfig;
pub use engine::{FusionEngine, RawMeasurement, TrackView};
pub use error::FusionError;
pub use event::FusionEvent;
pub use sensor::{Sensor, SensorTransform, SensorType};
