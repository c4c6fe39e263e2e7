//! Boundary contact, restitution and settle detection.
//!
//! After each integration step the handler walks the boundaries of the
//! variant in a fixed order. For every boundary the body touches it:
//!
//! 1. clamps the body so its edge sits exactly on the boundary,
//! 2. settles the run if the settle predicate holds, zeroing the velocity,
//! 3. otherwise reflects the normal velocity component, scaled by `bounce`.
//!
//! This is a discrete-time approximation: the exact contact time inside the
//! step is never solved for.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::Body;
use crate::params::{Bounds, SimulationParams};
use crate::vector::Vector;

/// A velocity axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// `x`.
    Horizontal,
    /// `y`.
    Vertical,
}

impl Axis {
    /// Returns the component of `v` along this axis.
    #[inline]
    pub const fn component(self, v: Vector) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    const fn component_mut(self, v: &mut Vector) -> &mut f64 {
        match self {
            Axis::Horizontal => &mut v.x,
            Axis::Vertical => &mut v.y,
        }
    }
}

/// One side of the rectangular domain. The top is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    /// `y = height`.
    Floor,
    /// `x = width`.
    RightWall,
    /// `x = 0`.
    LeftWall,
}

impl Boundary {
    /// Axis of the velocity component this boundary reflects.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Boundary::Floor => Axis::Vertical,
            Boundary::RightWall | Boundary::LeftWall => Axis::Horizontal,
        }
    }

    /// Returns `true` if the body overlaps the boundary, or rests on it
    /// without moving away.
    pub fn in_contact(self, body: &Body, bounds: &Bounds) -> bool {
        let r = body.radius();
        let (edge, limit, outward) = match self {
            Boundary::Floor => (body.position.y + r, bounds.height, body.velocity.y),
            Boundary::RightWall => (body.position.x + r, bounds.width, body.velocity.x),
            // Mirror the left wall so that "past the boundary" is always `>`.
            Boundary::LeftWall => (r - body.position.x, 0.0, -body.velocity.x),
        };
        edge > limit || (edge >= limit && outward >= 0.0)
    }

    /// Moves the body so its edge sits exactly on the boundary.
    pub fn clamp(self, body: &mut Body, bounds: &Bounds) {
        let r = body.radius();
        match self {
            Boundary::Floor => body.position.y = bounds.height - r,
            Boundary::RightWall => body.position.x = bounds.width - r,
            Boundary::LeftWall => body.position.x = r,
        }
    }
}

/// How many axes must be slow for a contact to settle the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettleRule {
    /// Only the contact axis is checked.
    ContactAxis,
    /// Every axis must be below the threshold.
    AllAxes,
}

/// What the handler did at a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactResponse {
    /// The normal velocity was reversed and attenuated.
    Bounced,
    /// The body was brought to rest and the run settled.
    Settled,
}

/// A resolved boundary contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Boundary that was touched.
    pub boundary: Boundary,
    /// Normal speed at the moment of contact, before the response.
    pub impact_speed: f64,
    /// Response applied.
    pub response: ContactResponse,
}

/// Outcome of resolving one tick's contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Body after every boundary has been applied.
    pub body: Body,
    /// Whether any contact settled the run.
    pub settled: bool,
    /// Contacts in evaluation order.
    pub contacts: Vec<Contact>,
}

impl Resolution {
    /// Number of contacts that bounced.
    pub fn bounces(&self) -> usize {
        self.contacts
            .iter()
            .filter(|c| c.response == ContactResponse::Bounced)
            .count()
    }
}

/// Applies a variant's boundary set to a freshly integrated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionHandler {
    boundaries: &'static [Boundary],
    rule: SettleRule,
}

impl CollisionHandler {
    /// Floor only; settling looks at the vertical speed.
    pub const fn free_fall() -> Self {
        Self {
            boundaries: &[Boundary::Floor],
            rule: SettleRule::ContactAxis,
        }
    }

    /// Floor, right wall, left wall; settling needs both axes slow.
    pub const fn projectile() -> Self {
        Self {
            boundaries: &[Boundary::Floor, Boundary::RightWall, Boundary::LeftWall],
            rule: SettleRule::AllAxes,
        }
    }

    /// Boundaries in evaluation order.
    pub const fn boundaries(&self) -> &'static [Boundary] {
        self.boundaries
    }

    /// Settle rule applied at contacts.
    pub const fn settle_rule(&self) -> SettleRule {
        self.rule
    }

    /// Resolves every boundary contact of `body`.
    ///
    /// Each boundary sees the body as left by the previous one, so a body
    /// past the floor and a wall in the same tick is corrected for both.
    pub fn resolve(&self, body: &Body, params: &SimulationParams) -> Resolution {
        let mut body = *body;
        let mut settled = false;
        let mut contacts = Vec::new();

        for &boundary in self.boundaries {
            if !boundary.in_contact(&body, &params.bounds) {
                continue;
            }
            boundary.clamp(&mut body, &params.bounds);

            let axis = boundary.axis();
            let impact_speed = axis.component(body.velocity).abs();

            let response = if self.should_settle(&body, axis, params) {
                body.velocity = Vector::zero();
                settled = true;
                ContactResponse::Settled
            } else {
                let v = axis.component_mut(&mut body.velocity);
                *v = -params.bounce * *v;
                ContactResponse::Bounced
            };

            debug!(?boundary, impact_speed, ?response, "boundary contact");
            contacts.push(Contact {
                boundary,
                impact_speed,
                response,
            });
        }

        Resolution {
            body,
            settled,
            contacts,
        }
    }

    fn should_settle(&self, body: &Body, axis: Axis, params: &SimulationParams) -> bool {
        if params.is_inelastic() {
            return true;
        }
        let eps = params.settle_speed;
        match self.rule {
            SettleRule::ContactAxis => axis.component(body.velocity).abs() < eps,
            SettleRule::AllAxes => body.velocity.x.abs() < eps && body.velocity.y.abs() < eps,
        }
    }
}
