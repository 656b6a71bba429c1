/// Horizontal scroll offset that keeps the player centred, clamped so the
/// view never shows past either end of the world.  No easing.
pub fn camera_offset(player_center_x: f32, view_width: f32, world_width: f32) -> f32 {
    let max_offset = (world_width - view_width).max(0.0);
    (player_center_x - view_width / 2.0).clamp(0.0, max_offset)
}
