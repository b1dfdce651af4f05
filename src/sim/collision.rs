//! Collision detection and response for axis-aligned rectangles
//!
//! Direction is inferred by comparing the two overlap lengths: a wide,
//! shallow overlap is a vertical hit, a tall, narrow one is a horizontal hit.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use super::rect::Rect;
use super::state::{Enemy, Player};

/// Set of sides on which a moving rectangle touched another one
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Contact(u8);

impl Contact {
    pub const NONE: Contact = Contact(0);
    /// Moving rectangle came down onto the other's top face
    pub const TOP: Contact = Contact(0b0001);
    /// Moving rectangle hit the other's underside
    pub const BOTTOM: Contact = Contact(0b0010);
    /// Moving rectangle hit the other's left face
    pub const LEFT: Contact = Contact(0b0100);
    /// Moving rectangle hit the other's right face
    pub const RIGHT: Contact = Contact(0b1000);

    #[inline]
    pub fn contains(self, other: Contact) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Contact) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Contact {
    type Output = Contact;

    fn bitor(self, rhs: Contact) -> Contact {
        Contact(self.0 | rhs.0)
    }
}

impl BitOrAssign for Contact {
    fn bitor_assign(&mut self, rhs: Contact) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Contact(NONE)");
        }
        let names = [
            (Contact::TOP, "TOP"),
            (Contact::BOTTOM, "BOTTOM"),
            (Contact::LEFT, "LEFT"),
            (Contact::RIGHT, "RIGHT"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Contact({})", set.join(" | "))
    }
}

/// Axis along which an overlap is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// TOP/BOTTOM contact
    Vertical,
    /// LEFT/RIGHT contact
    Horizontal,
}

/// Axis chosen when `overlap_x == overlap_y` exactly
pub const TIE_BREAK_AXIS: Axis = Axis::Vertical;

/// Pick the resolution axis from the two overlap lengths.
///
/// The larger x overlap means the rectangles mostly share horizontal extent,
/// so the hit came from above or below.
pub fn resolution_axis(overlap_x: f32, overlap_y: f32) -> Axis {
    if overlap_x > overlap_y {
        Axis::Vertical
    } else if overlap_x < overlap_y {
        Axis::Horizontal
    } else {
        TIE_BREAK_AXIS
    }
}

/// Classify how `moving` overlaps `other`.
///
/// Returns `Contact::NONE` when the rectangles do not strictly overlap,
/// otherwise exactly one side flag.
pub fn collision_direction(moving: &Rect, other: &Rect) -> Contact {
    if !moving.intersects(other) {
        return Contact::NONE;
    }

    match resolution_axis(moving.overlap_x(other), moving.overlap_y(other)) {
        Axis::Vertical => {
            if moving.y < other.y {
                Contact::TOP
            } else {
                Contact::BOTTOM
            }
        }
        Axis::Horizontal => {
            if moving.x < other.x {
                Contact::LEFT
            } else {
                Contact::RIGHT
            }
        }
    }
}

/// Push the player out of a platform and adjust its velocity.
///
/// Each flag is handled independently. Returns the contact that was applied.
pub fn resolve_player_platform(player: &mut Player, platform: &Rect) -> Contact {
    let contact = collision_direction(&player.rect, platform);

    if contact.contains(Contact::TOP) {
        player.rect.y = platform.top() - player.rect.height;
        player.vel.y = 0.0;
        player.on_ground = true;
    }
    if contact.contains(Contact::BOTTOM) {
        player.rect.y = platform.bottom();
        player.vel.y = -player.vel.y;
    }
    if contact.contains(Contact::LEFT) {
        player.rect.x = platform.left() - player.rect.width;
    }
    if contact.contains(Contact::RIGHT) {
        player.rect.x = platform.right();
    }

    contact
}

/// Reverse an enemy's patrol when it runs into the side of a platform.
///
/// Returns true if the horizontal velocity was flipped.
pub fn resolve_enemy_platform(enemy: &mut Enemy, platform: &Rect) -> bool {
    let contact = collision_direction(&enemy.rect, platform);
    if contact.intersects(Contact::LEFT | Contact::RIGHT) {
        enemy.vel.x = -enemy.vel.x;
        true
    } else {
        false
    }
}

/// Any overlap at all, ignoring direction (checkpoints, enemies)
#[inline]
pub fn touches(moving: &Rect, other: &Rect) -> bool {
    !collision_direction(moving, other).is_empty()
}
