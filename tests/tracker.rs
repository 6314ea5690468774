//! Sampler thread integration tests
//!
//! Runs the full tracker (both sampler threads) against scripted and
//! simulated sources. Waits are bounded polls on sampler counters.

use approx::assert_relative_eq;
use gati::devices::ScriptedSource;
use gati::devices::mock::{self, config::SimulationConfig};
use gati::{
    Error, OdometrySource, Pose, PoseTracker, SamplerStatsSnapshot, SamplingConfig, WheelDeltas,
    WheelSample, YawRateSource, YawSample,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const FAST: SamplingConfig = SamplingConfig {
    yaw_frequency_hz: 1000,
    odometry_frequency_hz: 1000,
};

/// Poll `cond` until it holds or five seconds pass.
fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

fn idle_yaw() -> ScriptedSource<YawSample> {
    ScriptedSource::new([])
}

fn idle_odometry() -> ScriptedSource<WheelSample> {
    ScriptedSource::new([])
}

#[test]
fn test_heading_stream_skips_failures() {
    let yaw = ScriptedSource::new([
        None,
        Some(YawSample::new(1.0, 1_000)),
        None,
        None,
        Some(YawSample::new(1.0, 1_250)),
        Some(YawSample::new(-2.0, 1_500)),
    ]);

    let tracker = PoseTracker::start(&FAST, yaw, idle_odometry()).unwrap();
    assert!(wait_until(|| tracker.yaw_stats().applied == 3));

    let report = tracker.shutdown().unwrap();
    // baseline, +1.0 rad/s * 250ms, -2.0 rad/s * 250ms
    assert_relative_eq!(report.pose.theta, -0.25, epsilon = 1e-12);
    assert_eq!(report.pose.x, 0.0);
    assert_eq!(report.pose.y, 0.0);
    assert_eq!(report.yaw.applied, 3);
    // Three scripted failures plus whatever ran after the script drained
    assert!(report.yaw.failures >= 3);
}

#[test]
fn test_position_stream_straight_line() {
    let wheels = ScriptedSource::from_samples(
        (0..20).map(|i| WheelSample::new(WheelDeltas::new(0.05, 0.05, 1.0, 1.0), i * 10)),
    );

    let tracker = PoseTracker::start(&FAST, idle_yaw(), wheels).unwrap();
    assert!(wait_until(|| tracker.odometry_stats().applied == 20));

    let pose = tracker.pose();
    assert_relative_eq!(pose.x, 1.0, epsilon = 1e-9);
    assert_eq!(pose.y, 0.0);
    assert_eq!(pose.theta, 0.0);

    tracker.shutdown().unwrap();
}

#[test]
fn test_failures_never_mutate_pose() {
    let yaw: ScriptedSource<YawSample> = ScriptedSource::new([None, None, None]);
    let wheels: ScriptedSource<WheelSample> = ScriptedSource::new([None, None, None]);

    let tracker = PoseTracker::start(&FAST, yaw, wheels).unwrap();
    assert!(wait_until(|| {
        tracker.yaw_stats().failures >= 10 && tracker.odometry_stats().failures >= 10
    }));

    assert_eq!(tracker.pose(), Pose::origin());
    let yaw_stats = tracker.yaw_stats();
    assert_eq!(yaw_stats.applied, 0);
    assert!(yaw_stats.consecutive_failures >= 10);

    let report = tracker.shutdown().unwrap();
    assert_eq!(report.pose, Pose::origin());
}

#[test]
fn test_consecutive_failures_reset_on_success() {
    let yaw = ScriptedSource::new([None, None, None, Some(YawSample::new(0.0, 0))]);

    let tracker = PoseTracker::start(&FAST, yaw, idle_odometry()).unwrap();
    assert!(wait_until(|| tracker.yaw_stats().applied == 1));

    let report = tracker.shutdown().unwrap();
    assert_eq!(report.yaw.applied, 1);
    assert!(report.yaw.failures >= 3);
    // Only failures after the script ran dry count toward the final streak
    assert_eq!(report.yaw.consecutive_failures, report.yaw.failures - 3);
}

#[test]
fn test_zero_frequency_rejected() {
    let config = SamplingConfig::new(0, 10);
    let result = PoseTracker::start(&config, idle_yaw(), idle_odometry());
    assert!(matches!(result, Err(Error::InvalidParameter(_))));

    let config = SamplingConfig::new(10, 0);
    let result = PoseTracker::start(&config, idle_yaw(), idle_odometry());
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
}

#[test]
fn test_drop_stops_samplers() {
    let tracker = PoseTracker::start(&FAST, idle_yaw(), idle_odometry()).unwrap();
    let stop = tracker.stop_signal();
    assert!(!stop.is_triggered());

    drop(tracker);
    assert!(stop.is_triggered());
}

#[test]
fn test_wait_returns_after_external_stop() {
    // Slow loops: the stop signal must wake them out of their sleep
    let config = SamplingConfig::new(1, 1);
    let tracker = PoseTracker::start(&config, idle_yaw(), idle_odometry()).unwrap();
    let stop = tracker.stop_signal();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        stop.trigger();
    });

    let start = Instant::now();
    let report = tracker.wait().unwrap();
    stopper.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(report.pose, Pose::origin());
    assert_eq!(report.odometry, SamplerStatsSnapshot {
        applied: 0,
        failures: report.odometry.failures,
        consecutive_failures: report.odometry.failures,
        overruns: report.odometry.overruns,
    });
}

#[test]
fn test_mock_robot_drives_straight() {
    let config = SimulationConfig {
        linear_speed: 1.0,
        angular_speed: 0.0,
        ..SimulationConfig::default()
    };
    let (gyro, wheels) = mock::create_sources(&config).unwrap();

    let sampling = SamplingConfig::new(200, 100);
    let tracker = PoseTracker::start(&sampling, gyro, wheels).unwrap();
    assert!(wait_until(|| tracker.pose().x > 0.05));

    let report = tracker.shutdown().unwrap();
    assert!(report.pose.x > 0.05);
    assert_eq!(report.pose.y, 0.0);
    assert_eq!(report.pose.theta, 0.0);
    assert!(report.yaw.applied > 0);
    assert!(report.odometry.applied > 0);
}

#[test]
fn test_mock_robot_turns_ccw() {
    let config = SimulationConfig {
        linear_speed: 0.0,
        angular_speed: 1.0,
        ..SimulationConfig::default()
    };
    let (gyro, wheels) = mock::create_sources(&config).unwrap();

    let sampling = SamplingConfig::new(200, 100);
    let tracker = PoseTracker::start(&sampling, gyro, wheels).unwrap();
    assert!(wait_until(|| tracker.pose().theta > 0.05));

    let report = tracker.shutdown().unwrap();
    assert!(report.pose.theta > 0.05);
    // Turning in place: rear wheels cancel out
    assert_relative_eq!(report.pose.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(report.pose.y, 0.0, epsilon = 1e-9);
}

/// Gyro whose driver crashes on first use.
struct CrashingGyro;

impl YawRateSource for CrashingGyro {
    fn acquire_yaw_rate(&mut self, _timeout: Duration) -> gati::Result<YawSample> {
        panic!("gyro driver crashed");
    }
}

/// Odometry source that records when its sampler thread released it.
struct DropFlagOdometry(Arc<AtomicBool>);

impl OdometrySource for DropFlagOdometry {
    fn acquire_odometry(&mut self, _timeout: Duration) -> gati::Result<WheelSample> {
        Err(Error::SensorUnavailable("idle".to_string()))
    }
}

impl Drop for DropFlagOdometry {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_sampler_panic_reported_on_shutdown() {
    let released = Arc::new(AtomicBool::new(false));
    let odometry = DropFlagOdometry(Arc::clone(&released));

    let tracker = PoseTracker::start(&FAST, CrashingGyro, odometry).unwrap();
    assert!(wait_until(|| !tracker.is_running()));
    assert!(!released.load(Ordering::SeqCst));

    match tracker.shutdown() {
        Err(Error::ThreadPanicked(msg)) => {
            assert!(msg.contains("yaw-sampler"), "msg = {}", msg);
            assert!(msg.contains("gyro driver crashed"), "msg = {}", msg);
        }
        other => panic!("expected ThreadPanicked, got {:?}", other),
    }
    // The odometry thread was joined despite the yaw failure
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn test_is_running_until_stopped() {
    let tracker = PoseTracker::start(&FAST, idle_yaw(), idle_odometry()).unwrap();
    assert!(tracker.is_running());

    tracker.stop_signal().trigger();
    assert!(wait_until(|| !tracker.is_running()));
    tracker.wait().unwrap();
}
