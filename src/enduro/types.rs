//! Enduro data structures: board geometry, cars, and the run state.
//!
//! All geometry is in logical pixels on a fixed board (480×640 by default).
//! The UI scales the board into whatever terminal area it is given.

use rand::Rng;
use thiserror::Error;

/// Board dimensions.
pub const SCREEN_WIDTH: i32 = 480;
pub const SCREEN_HEIGHT: i32 = 640;

/// Drivable band, centered on the board.
pub const ROAD_WIDTH: i32 = 320;

/// Every car (player and traffic) has the same footprint.
pub const CAR_WIDTH: i32 = 40;
pub const CAR_HEIGHT: i32 = 60;

/// Gap between the player's bumper and the bottom edge.
pub const PLAYER_MARGIN: i32 = 20;

/// Horizontal step per frame while a steer key is active.
pub const PLAYER_SPEED: i32 = 5;

/// Downward step per frame for traffic.
pub const OBSTACLE_SPEED: i32 = 6;

/// Time between traffic spawns.
pub const SPAWN_INTERVAL_MS: u64 = 800;

/// Lane marker geometry. Markers repeat every `LANE_MARKER_SPACING` rows and
/// scroll down by `LANE_SCROLL_STEP` each frame.
pub const LANE_MARKER_SPACING: i32 = 40;
pub const LANE_MARKER_WIDTH: i32 = 10;
pub const LANE_MARKER_HEIGHT: i32 = 20;
pub const LANE_SCROLL_STEP: i32 = 5;

pub const TARGET_FPS: u32 = 60;

/// Axis-aligned rectangle in board coordinates. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True if the point lies inside (left/top inclusive, right/bottom exclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.left() as f64
            && px < self.right() as f64
            && py >= self.top() as f64
            && py < self.bottom() as f64
    }
}

/// Paint tag for a car. The UI maps this to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarColor {
    Blue,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Car {
    pub rect: Rect,
    pub color: CarColor,
    /// Downward movement per frame. Zero for the player.
    pub speed: i32,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The player asked to quit.
    Quit,
    /// The player hit traffic.
    Crashed,
}

/// Invalid board configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },

    #[error("road width {road} must be narrower than the board width {screen}")]
    RoadTooWide { road: i32, screen: i32 },

    #[error("car width {car} does not fit on a road {road} wide")]
    CarTooWide { car: i32, road: i32 },

    #[error("car size must be positive, got {width}x{height}")]
    EmptyCar { width: i32, height: i32 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),
}

/// Tunables for a run. `Default` gives the classic 480×640 board; tests use
/// smaller boards or shorter spawn intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnduroConfig {
    pub width: i32,
    pub height: i32,
    pub road_width: i32,
    pub car_width: i32,
    pub car_height: i32,
    pub player_margin: i32,
    pub player_speed: i32,
    pub obstacle_speed: i32,
    pub spawn_interval_ms: u64,
    pub lane_marker_spacing: i32,
    pub lane_marker_width: i32,
    pub lane_marker_height: i32,
    pub lane_scroll_step: i32,
    pub target_fps: u32,
}

impl Default for EnduroConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            road_width: ROAD_WIDTH,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            player_margin: PLAYER_MARGIN,
            player_speed: PLAYER_SPEED,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            lane_marker_spacing: LANE_MARKER_SPACING,
            lane_marker_width: LANE_MARKER_WIDTH,
            lane_marker_height: LANE_MARKER_HEIGHT,
            lane_scroll_step: LANE_SCROLL_STEP,
            target_fps: TARGET_FPS,
        }
    }
}

impl EnduroConfig {
    /// Check that the road fits on the board with a margin on both sides and
    /// that every rate is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.car_width <= 0 || self.car_height <= 0 {
            return Err(ConfigError::EmptyCar {
                width: self.car_width,
                height: self.car_height,
            });
        }
        if self.road_width >= self.width {
            return Err(ConfigError::RoadTooWide {
                road: self.road_width,
                screen: self.width,
            });
        }
        if self.car_width > self.road_width {
            return Err(ConfigError::CarTooWide {
                car: self.car_width,
                road: self.road_width,
            });
        }
        if self.player_speed < 0 {
            return Err(ConfigError::Negative("player speed"));
        }
        if self.lane_scroll_step < 0 {
            return Err(ConfigError::Negative("lane scroll step"));
        }
        if self.obstacle_speed <= 0 {
            return Err(ConfigError::Zero("obstacle speed"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::Zero("spawn interval"));
        }
        if self.lane_marker_spacing <= 0 {
            return Err(ConfigError::Zero("lane marker spacing"));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Zero("target fps"));
        }
        Ok(())
    }

    /// Left edge of the road band.
    pub fn road_left(&self) -> i32 {
        (self.width - self.road_width) / 2
    }

    /// Right edge of the road band (exclusive).
    pub fn road_right(&self) -> i32 {
        self.road_left() + self.road_width
    }

    /// Range of x positions that keep a car of `car_width` on the road.
    pub fn lane_range(&self, car_width: i32) -> (i32, i32) {
        (self.road_left(), self.road_right() - car_width)
    }
}

/// Main run state. `outcome == None` means the run is still going.
#[derive(Debug, Clone)]
pub struct EnduroGame {
    pub config: EnduroConfig,
    pub player: Car,
    /// Traffic, oldest spawn first.
    pub obstacles: Vec<Car>,
    /// Simulated time at which the next car appears.
    pub next_spawn_ms: u64,
    pub outcome: Option<RunOutcome>,
    /// Lane marker scroll offset, always in `[0, lane_marker_spacing)`.
    pub lane_offset: i32,

    // -- Run stats --
    pub frame_count: u64,
    pub elapsed_ms: u64,
    pub obstacles_spawned: u64,
}

impl EnduroGame {
    /// Start a run: player centered near the bottom edge, no traffic.
    pub fn new(config: EnduroConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let start_x = (config.width - config.car_width) / 2;
        let start_y = config.height - config.car_height - config.player_margin;
        let player = Car {
            rect: Rect::new(start_x, start_y, config.car_width, config.car_height),
            color: CarColor::Blue,
            speed: 0,
        };

        Ok(Self {
            config,
            player,
            obstacles: Vec::new(),
            next_spawn_ms: 0,
            outcome: None,
            lane_offset: 0,
            frame_count: 0,
            elapsed_ms: 0,
            obstacles_spawned: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        self.outcome.is_none()
    }

    /// Add one car at a random x on the road, just above the top edge.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let (min_x, max_x) = self.config.lane_range(self.config.car_width);
        let x = rng.gen_range(min_x..=max_x);

        self.obstacles.push(Car {
            rect: Rect::new(
                x,
                -self.config.car_height,
                self.config.car_width,
                self.config.car_height,
            ),
            color: CarColor::Red,
            speed: self.config.obstacle_speed,
        });
        self.obstacles_spawned += 1;
    }
}
