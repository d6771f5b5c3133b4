// Signal timing (milliseconds)
pub const GREEN_DURATION_MS: u64 = 5000;
pub const YELLOW_DURATION_MS: u64 = 2000;
pub const RED_DURATION_MS: u64 = 1000;

// Movement permits armed on every green phase
pub const STRAIGHT_PERMITS: usize = 3;
pub const LEFT_PERMITS: usize = 1;
pub const RIGHT_PERMITS: usize = 1;

// Maximum number of vehicles logically inside the intersection
pub const INTERSECTION_CAPACITY: usize = 2;

// Vehicle arrivals (milliseconds, half-open range)
pub const ARRIVAL_MIN_MS: u64 = 1500;
pub const ARRIVAL_MAX_MS: u64 = 3500;

// Driver reaction before asking for right of way
pub const REACTION_MIN_MS: u64 = 300;
pub const REACTION_MAX_MS: u64 = 900;

// Admission polling
pub const ADMISSION_POLL_MS: u64 = 100;
pub const NEAR_MISS_THRESHOLD_MS: u64 = 1000;

pub const MONITOR_PERIOD_MS: u64 = 1000;

// Movement type split (percent)
pub const STRAIGHT_WEIGHT: u32 = 60;
pub const LEFT_WEIGHT: u32 = 20;
pub const RIGHT_WEIGHT: u32 = 20;

// Animation: steps x step delay
pub const APPROACH_STEPS: u32 = 20;
pub const APPROACH_STEP_MS: u64 = 50;
pub const CROSSING_STEPS: u32 = 30;
pub const CROSSING_STEP_MS: u64 = 100;
pub const EXIT_STEPS: u32 = 20;
pub const EXIT_STEP_MS: u64 = 30;

// Canvas geometry
pub const CENTER_X: f64 = 400.0;
pub const CENTER_Y: f64 = 350.0;
pub const INTERSECTION_HALF_WIDTH: f64 = 100.0;
pub const ROAD_HALF_LENGTH: f64 = 300.0;

pub const VEHICLE_GLYPHS: [&str; 5] = ["🚗", "🚙", "🚕", "🚐", "🚌"];
