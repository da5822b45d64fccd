//! Central system ordering labels to make the update sequence explicit.
//! Startup:
//! 1. Scenery (grounds, structures, pigs, sling base)
//! 2. Queue (bird bodies)
//! 3. Load (first bird onto the sling)
//!
//! Update:
//! 1. PrePhysics (input, drag velocity, launch impulses)
//! 2. Rapier (handled by plugin)
//! 3. PostPhysicsAdjust (flight monitoring, pig damage checks)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SetupSet {
    Scenery,
    Queue,
    Load,
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // input and velocity edits before the physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // checks that read the stepped bodies
