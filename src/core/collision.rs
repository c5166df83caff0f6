//! Axis-aligned overlap tests, boundary tests and pass-through scoring.

use super::obstacles::Obstacle;

/// Axis-aligned box in surface units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// True if the player box overlaps the obstacle's span horizontally and
/// pokes outside the gap vertically.
pub fn hits_obstacle(player: &Bounds, obstacle: &Obstacle) -> bool {
    let overlaps_horizontally =
        player.right() > obstacle.x && player.left() < obstacle.trailing_edge();
    overlaps_horizontally
        && (player.top() < obstacle.top_height || player.bottom() > obstacle.bottom_top())
}

/// True if the player has hit the ground line or left the top of the surface.
pub fn hits_boundary(player: &Bounds, ground_y: f32) -> bool {
    player.bottom() > ground_y || player.top() < 0.0
}

/// Mark an obstacle passed once its trailing edge is behind the player's
/// leading edge. Returns true exactly once per obstacle.
pub fn try_pass(player: &Bounds, obstacle: &mut Obstacle) -> bool {
    if obstacle.passed || obstacle.trailing_edge() >= player.left() {
        return false;
    }
    obstacle.passed = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32, width: u32, top_height: f32, gap: f32) -> Obstacle {
        Obstacle {
            x,
            top_height,
            gap,
            width,
            speed: 3.0,
            passed: false,
            gradient: None,
        }
    }

    #[test]
    fn test_collision_with_top_segment() {
        let player = Bounds::new(40.0, 0.0, 10.0, 10.0);
        let o = obstacle(35.0, 20, 5.0, 100.0);
        assert!(hits_obstacle(&player, &o));
    }

    #[test]
    fn test_collision_with_bottom_segment() {
        let player = Bounds::new(40.0, 100.0, 10.0, 10.0);
        let o = obstacle(35.0, 20, 5.0, 100.0);
        // bottom 110 > 105
        assert!(hits_obstacle(&player, &o));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let player = Bounds::new(40.0, 20.0, 10.0, 10.0);
        let o = obstacle(35.0, 20, 5.0, 100.0);
        assert!(!hits_obstacle(&player, &o));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        let player = Bounds::new(0.0, 0.0, 10.0, 10.0);
        // Touching edges do not overlap
        let o = obstacle(10.0, 20, 50.0, 100.0);
        assert!(!hits_obstacle(&player, &o));
        let behind = obstacle(-30.0, 20, 50.0, 100.0);
        assert!(!hits_obstacle(&player, &behind));
    }

    #[test]
    fn test_boundary_collision() {
        assert!(hits_boundary(&Bounds::new(0.0, 95.0, 10.0, 10.0), 100.0));
        assert!(hits_boundary(&Bounds::new(0.0, -0.1, 10.0, 10.0), 100.0));
        assert!(!hits_boundary(&Bounds::new(0.0, 0.0, 10.0, 10.0), 100.0));
        assert!(!hits_boundary(&Bounds::new(0.0, 90.0, 10.0, 10.0), 100.0));
    }

    #[test]
    fn test_pass_fires_once() {
        let player = Bounds::new(50.0, 0.0, 10.0, 10.0);
        let mut o = obstacle(0.0, 20, 50.0, 100.0);
        assert!(try_pass(&player, &mut o));
        assert!(o.passed);
        assert!(!try_pass(&player, &mut o));
    }

    #[test]
    fn test_pass_requires_trailing_edge_strictly_behind() {
        let player = Bounds::new(50.0, 0.0, 10.0, 10.0);
        let mut o = obstacle(30.0, 20, 50.0, 100.0);
        assert!(!try_pass(&player, &mut o));
        o.x = 29.5;
        assert!(try_pass(&player, &mut o));
    }
}
