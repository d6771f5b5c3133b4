//! Display geometry for vehicle agents.
//!
//! Nothing here touches a gate; the agent samples these paths while it
//! sleeps between animation steps so a view can draw it.

use crate::global_variables::{CENTER_X, CENTER_Y, INTERSECTION_HALF_WIDTH, ROAD_HALF_LENGTH};
use crate::models::direction::{Direction, MovementType};
use crate::models::vehicle::Position;

fn on_side(side: Direction, distance: f64) -> Position {
    let (dx, dy) = side.offset();
    Position::new(CENTER_X + dx * distance, CENTER_Y + dy * distance)
}

pub fn center() -> Position {
    Position::new(CENTER_X, CENTER_Y)
}

/// Where a vehicle arriving from `from` appears.
pub fn spawn_point(from: Direction) -> Position {
    on_side(from, ROAD_HALF_LENGTH)
}

/// Edge of the intersection box on the arrival side.
pub fn entry_point(from: Direction) -> Position {
    on_side(from, INTERSECTION_HALF_WIDTH)
}

/// Edge of the intersection box on the side the movement leaves through.
pub fn exit_point(from: Direction, movement: MovementType) -> Position {
    on_side(movement.exit_side(from), INTERSECTION_HALF_WIDTH)
}

/// Off-screen end of the road the vehicle leaves on.
pub fn departure_point(from: Direction, movement: MovementType) -> Position {
    on_side(movement.exit_side(from), ROAD_HALF_LENGTH)
}

pub fn lerp(a: Position, b: Position, t: f64) -> Position {
    let t = t.clamp(0.0, 1.0);
    Position::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Quadratic Bézier from `a` to `b` bending towards `control`.
pub fn quadratic(a: Position, control: Position, b: Position, t: f64) -> Position {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    Position::new(
        u * u * a.x + 2.0 * u * t * control.x + t * t * b.x,
        u * u * a.y + 2.0 * u * t * control.y + t * t * b.y,
    )
}

/// Point on the crossing path at progress `t` in `[0, 1]`. Straight
/// movements run linearly through the box; turns curve through the centre.
pub fn crossing_position(from: Direction, movement: MovementType, t: f64) -> Position {
    let start = entry_point(from);
    let end = exit_point(from, movement);
    if movement.is_turn() {
        quadratic(start, center(), end, t)
    } else {
        lerp(start, end, t)
    }
}

/// Progress fraction for step `i` of `steps` (inclusive of both ends).
pub fn progress(i: u32, steps: u32) -> f64 {
    if steps == 0 {
        1.0
    } else {
        f64::from(i) / f64::from(steps)
    }
}
