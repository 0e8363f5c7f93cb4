use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Frames between periodic stats log lines.
pub const STATS_LOG_INTERVAL: u64 = 300;

pub struct FrameStats {
    pub frame_count: u64,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.record(now.duration_since(self.last_instant).as_secs_f64());
        self.last_instant = now;
    }

    /// Feeds one frame duration in seconds.
    pub fn record(&mut self, dt: f64) {
        self.real_dt = dt;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        if self.frame_count % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "frame {}: {:.1} fps ({:.2} ms)",
                self.frame_count,
                self.smoothed_fps,
                self.smoothed_frame_time_ms
            );
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
