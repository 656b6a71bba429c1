/// Victory confetti.  Purely decorative; nothing here feeds back into play.
use rand::Rng;

use crate::entities::Particle;
use crate::geometry::Rect;

const CONFETTI_GRAVITY: f32 = 0.15;

/// Burst of confetti from the top of the goal.
pub fn spawn_confetti(goal: &Rect, count: usize, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: goal.center_x() + rng.gen_range(-20.0..20.0),
            y: goal.top() + rng.gen_range(-10.0..10.0),
            vx: rng.gen_range(-4.0..4.0),
            vy: rng.gen_range(-9.0..-3.0),
            rotation: rng.gen_range(0.0..360.0),
            spin: rng.gen_range(-12.0..12.0),
            age: 0.0,
            lifespan: rng.gen_range(1.5..3.5),
        })
        .collect()
}

/// Move, spin and age every particle; expired ones are dropped.
pub fn update_confetti(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.vy += CONFETTI_GRAVITY;
        p.x += p.vx;
        p.y += p.vy;
        p.rotation = (p.rotation + p.spin).rem_euclid(360.0);
        p.age += dt;
    }
    particles.retain(|p| p.age < p.lifespan);
}
