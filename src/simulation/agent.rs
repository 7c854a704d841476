//! Agent state, senses and the think step.
//!
//! Organisms and predators share one shape and differ only by [`Role`]. Each
//! tick an agent fills its [`Senses`] through the behavior functions, then
//! [`Agent::think`] turns them into a heading and speed change.

use std::f32::consts::TAU;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, bearing};
use super::brain::{Brain, MOTOR_OUTPUTS};
use super::error::SimError;
use super::locatable::Locatable;
use super::settings::Settings;

/// Number of sensory channels an agent can feed to its brain.
pub const SENSE_CHANNELS: usize = 7;

/// What part an agent plays in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Eats food, flees predators.
    Organism,
    /// Hunts organisms.
    Predator,
}

impl Role {
    /// Prefix used when naming founders of this role.
    pub fn prefix(self) -> &'static str {
        match self {
            Role::Organism => "org",
            Role::Predator => "pred",
        }
    }
}

/// Ancestry of an agent, kept for analysis only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    /// Name of the randomly created ancestor.
    pub founder: String,
    /// Name of the direct parent, if bred.
    pub parent: Option<String>,
    /// Number of breeding steps since the founder.
    pub depth: u32,
}

impl Lineage {
    /// Lineage of a randomly created agent named `name`.
    pub fn founder(name: &str) -> Self {
        Self {
            founder: name.to_string(),
            parent: None,
            depth: 0,
        }
    }

    /// Lineage of a child of `parent`.
    pub fn child_of(parent: &Agent) -> Self {
        Self {
            founder: parent.lineage.founder.clone(),
            parent: Some(parent.name.clone()),
            depth: parent.lineage.depth + 1,
        }
    }
}

/// The closest target of one kind sensed so far this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensed {
    /// Distance to the target, or the vision range if nothing was sensed.
    pub distance: f32,
    /// Bearing relative to the heading, in `[-1, 1]`.
    pub bearing: f32,
    /// Whether any target has been sensed.
    pub detected: bool,
}

impl Sensed {
    /// Nothing sensed within `vision`.
    pub fn nothing(vision: f32) -> Self {
        Self {
            distance: vision,
            bearing: 0.0,
            detected: false,
        }
    }

    /// `1` when touching the target, falling to `0` at the edge of vision.
    pub fn proximity(&self, vision: f32) -> f32 {
        if self.detected && vision > 0.0 {
            1.0 - self.distance / vision
        } else {
            0.0
        }
    }
}

/// Which sense slot a behavior function writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Food for organisms, prey for predators.
    Target,
    /// Predators, sensed by organisms. The bearing points away from them.
    Threat,
    /// Other organisms.
    Crowd,
}

/// Per-tick sensory scratch state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Senses {
    /// Nearest food (organisms) or prey (predators).
    pub target: Sensed,
    /// Nearest predator.
    pub threat: Sensed,
    /// Nearest other organism.
    pub crowd: Sensed,
}

impl Senses {
    /// Empty senses for an agent that sees up to `vision`.
    pub fn new(vision: f32) -> Self {
        Self {
            target: Sensed::nothing(vision),
            threat: Sensed::nothing(vision),
            crowd: Sensed::nothing(vision),
        }
    }

    /// Mutable access to one slot.
    pub fn slot_mut(&mut self, slot: Slot) -> &mut Sensed {
        match slot {
            Slot::Target => &mut self.target,
            Slot::Threat => &mut self.threat,
            Slot::Crowd => &mut self.crowd,
        }
    }

    /// The brain input vector: the first `inodes` of the sensory channels.
    ///
    /// Channel order is bearings (target, threat, crowd), proximities in the
    /// same order, then the speed ratio.
    pub fn inputs(&self, vision: f32, speed_ratio: f32, inodes: usize) -> Array1<f32> {
        let channels: [f32; SENSE_CHANNELS] = [
            self.target.bearing,
            self.threat.bearing,
            self.crowd.bearing,
            self.target.proximity(vision),
            self.threat.proximity(vision),
            self.crowd.proximity(vision),
            speed_ratio,
        ];
        channels.into_iter().take(inodes).collect()
    }
}

/// An organism or predator with a perceptron brain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Display name, derived from the lineage.
    pub name: String,
    /// Ancestry.
    pub lineage: Lineage,
    /// Organism or predator.
    pub role: Role,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Heading in radians, in `[0, 2π)`.
    pub heading: f32,
    /// Current speed, in `[0, v_max]`.
    pub speed: f32,
    /// Fitness accumulated this generation.
    pub fitness: f32,
    /// Cleared when an organism is caught.
    pub alive: bool,
    /// Neural network that controls behavior.
    pub brain: Brain,
    /// Closest targets sensed this tick.
    pub senses: Senses,
}

impl Agent {
    /// Places an agent with the given brain at a random position, heading and
    /// speed.
    pub fn spawn<R: Rng + ?Sized>(
        settings: &Settings,
        role: Role,
        name: String,
        lineage: Lineage,
        brain: Brain,
        rng: &mut R,
    ) -> Self {
        let pos = settings.arena().random_point(rng);
        let heading = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.0..settings.v_max);
        let vision = vision_of(settings, role);
        Self {
            name,
            lineage,
            role,
            pos,
            heading,
            speed,
            fitness: 0.0,
            alive: true,
            brain,
            senses: Senses::new(vision),
        }
    }

    /// Creates a founder with a random brain.
    ///
    /// Draw order is brain weights first, then placement.
    pub fn new_random<R: Rng + ?Sized>(settings: &Settings, role: Role, name: String, rng: &mut R) -> Self {
        let brain = Brain::new_random(
            settings.inodes,
            settings.hnodes,
            settings.onodes,
            settings.weight_limit,
            rng,
        );
        let lineage = Lineage::founder(&name);
        Self::spawn(settings, role, name, lineage, brain, rng)
    }

    /// How far this agent can sense.
    pub fn vision(&self, settings: &Settings) -> f32 {
        vision_of(settings, self.role)
    }

    /// Clears the per-tick senses.
    pub fn reset_senses(&mut self, settings: &Settings) {
        self.senses = Senses::new(self.vision(settings));
    }

    /// Marks the agent as caught.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Feeds the senses through the brain and moves.
    ///
    /// `out[0]` turns, `out[1]` accelerates. The new position is confined to
    /// the arena.
    pub fn think(&mut self, settings: &Settings, arena: &Arena) -> Result<(), SimError> {
        let vision = self.vision(settings);
        let inputs = self
            .senses
            .inputs(vision, self.speed / settings.v_max, settings.inodes);
        if let Some(detail) = self.brain.shape_error(inputs.len(), MOTOR_OUTPUTS) {
            return Err(SimError::MalformedBrain {
                agent: self.name.clone(),
                detail,
            });
        }
        let out = self.brain.think(&inputs);

        self.heading = wrap_heading(self.heading + out[0] * settings.dr_max * settings.dt);
        self.speed = (self.speed + out[1] * settings.dv_max * settings.dt).clamp(0.0, settings.v_max);

        let step = self.speed * settings.dt;
        self.pos[0] += step * self.heading.cos();
        self.pos[1] += step * self.heading.sin();
        arena.confine(&mut self.pos);
        Ok(())
    }

    /// Records a sighting in `slot` if it beats the current closest distance.
    ///
    /// Returns the new closest distance. Threat bearings point away from the
    /// target.
    pub fn sight(&mut self, slot: Slot, closest: f32, distance: f32, dx: f32, dy: f32) -> f32 {
        if distance >= closest {
            return closest;
        }
        let (bx, by) = if slot == Slot::Threat { (-dx, -dy) } else { (dx, dy) };
        *self.senses.slot_mut(slot) = Sensed {
            distance,
            bearing: bearing(self.heading, bx, by),
            detected: true,
        };
        distance
    }
}

/// Wraps into `[0, 2π)`. `rem_euclid` alone can round up to exactly `2π`.
fn wrap_heading(heading: f32) -> f32 {
    let wrapped = heading.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

fn vision_of(settings: &Settings, role: Role) -> f32 {
    match role {
        Role::Organism => settings.org_vision_dist,
        Role::Predator => settings.pred_vision_dist,
    }
}

impl Locatable for Agent {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn is_present(&self) -> bool {
        self.alive
    }
}
