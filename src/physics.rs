/// Gravity integration and split-axis collision resolution.
///
/// Movement is resolved one axis at a time: horizontal displacement and its
/// collisions first, then gravity, vertical displacement and vertical
/// collisions.  Obstacles are checked in slice order and each overlap is
/// resolved against the already-corrected rectangle; there is no sorting by
/// penetration depth.
use crate::config::Tuning;
use crate::entities::Body;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Add one tick of gravity, capped at terminal velocity.
pub fn apply_gravity(vy: f32, gravity: f32, max_fall_speed: f32) -> f32 {
    (vy + gravity).min(max_fall_speed)
}

/// Push `body` out of every obstacle it overlaps along `axis`.
///
/// Horizontal contact snaps to the obstacle's near edge and zeroes `vx`.
/// Downward contact lands the body (`on_ground = true`); upward contact bumps
/// its head.  Either vertical contact zeroes `vy`.
pub fn collide_axis(body: &mut Body, obstacles: &[Rect], axis: Axis) {
    for obstacle in obstacles {
        if !body.rect.overlaps(obstacle) {
            continue;
        }
        match axis {
            Axis::Horizontal => {
                if body.vx > 0.0 {
                    body.rect.set_right(obstacle.left());
                } else if body.vx < 0.0 {
                    body.rect.set_left(obstacle.right());
                }
                body.vx = 0.0;
            }
            Axis::Vertical => {
                if body.vy > 0.0 {
                    body.rect.set_bottom(obstacle.top());
                    body.on_ground = true;
                } else if body.vy < 0.0 {
                    body.rect.set_top(obstacle.bottom());
                }
                body.vy = 0.0;
            }
        }
    }
}

/// Advance `body` by one tick.  `body.vx` must already hold this tick's
/// horizontal velocity.
pub fn integrate(body: &mut Body, obstacles: &[Rect], tuning: &Tuning) {
    body.rect.x += body.vx;
    collide_axis(body, obstacles, Axis::Horizontal);

    body.vy = apply_gravity(body.vy, tuning.gravity, tuning.max_fall_speed);
    body.rect.y += body.vy;
    body.on_ground = false;
    collide_axis(body, obstacles, Axis::Vertical);
}
