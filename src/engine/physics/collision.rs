use rapier2d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// The walking character
    Player = 0b0000_0001,

    /// Static wall tiles
    Wall = 0b0000_0010,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Players are only stopped by walls
            CollisionGroups::Player => Group::from_bits_truncate(CollisionGroups::Wall as u32),

            // Walls never move, they only need to see players
            CollisionGroups::Wall => Group::from_bits_truncate(CollisionGroups::Player as u32),
        };

        InteractionGroups::new(memberships, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_bits() {
        assert_ne!(
            CollisionGroups::Player as u32,
            CollisionGroups::Wall as u32,
            "Groups must have unique bits"
        );
    }

    #[test]
    fn test_player_doesnt_collide_with_player() {
        let player_groups = CollisionGroups::Player.to_interaction_groups();

        assert!(
            !player_groups.filter.contains(player_groups.memberships),
            "Players should not collide with other players"
        );
    }

    #[test]
    fn test_player_and_wall_interact() {
        let player = CollisionGroups::Player.to_interaction_groups();
        let wall = CollisionGroups::Wall.to_interaction_groups();

        assert!(player.test(wall));
        assert!(!wall.test(CollisionGroups::Wall.to_interaction_groups()));
    }
}
