//! The node-connection minigame ("Mundo Decentralizado").
//!
//! Eight peers sit on a ring around a central server. Clicking a peer
//! connects it to the network; once every peer is connected the level is
//! complete.
//!
//! # Invariants
//!
//! - `Node::connected` only ever flips from `false` to `true`.
//! - Progress is `connected / total * 100`, derived on read, never stored.
//! - The score moves only when a node actually changes state, so repeated
//!   clicks on the same node are no-ops.
//!
//! Timing (particle expiry, the scripted critical-error banner, the delayed
//! completion) belongs to the owning session; this engine only exposes the
//! state changes those timers trigger.

use std::f64::consts::TAU;

use stellar_types::{Node, NodeGamePhase, Particle, Position};
use tracing::debug;

use crate::config::BoardConfig;
use crate::decoration::Decorator;
use crate::score::ScoreTracker;

/// Outcome of a node click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeClick {
    /// The node was connected and the score increased.
    Connected {
        /// The node that was connected.
        node_id: u32,
        /// Burst spawned at the node; the session expires it later.
        particle: Particle,
        /// Whether this click connected the last node.
        completed: bool,
    },
    /// The node was already connected. Nothing changed.
    AlreadyConnected,
    /// No node has this id. Nothing changed.
    UnknownNode,
    /// The board is not accepting clicks (not started, or complete).
    NotInProgress,
}

/// State of the node-connection minigame.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConnectionEngine {
    phase: NodeGamePhase,
    nodes: Vec<Node>,
    particles: Vec<Particle>,
    next_particle_id: u32,
    critical_error: bool,
}

impl Default for NodeConnectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeConnectionEngine {
    /// An empty board in [`NodeGamePhase::Initializing`].
    pub const fn new() -> Self {
        Self {
            phase: NodeGamePhase::Initializing,
            nodes: Vec::new(),
            particles: Vec::new(),
            next_particle_id: 0,
            critical_error: false,
        }
    }

    /// Lay out a fresh ring of unconnected nodes and start accepting clicks.
    ///
    /// Calling this again resets the board.
    pub fn start(&mut self, board: &BoardConfig, decorator: &mut Decorator) {
        self.nodes = layout(board, decorator);
        self.particles.clear();
        self.next_particle_id = 0;
        self.critical_error = false;
        self.phase = if self.nodes.is_empty() {
            NodeGamePhase::Complete
        } else {
            NodeGamePhase::InProgress
        };
        debug!(nodes = self.nodes.len(), "Node board laid out");
    }

    /// Connect a node, crediting `bonus` to `score` if it was unconnected.
    pub fn click_node(&mut self, node_id: u32, score: &mut ScoreTracker, bonus: u32) -> NodeClick {
        if self.phase != NodeGamePhase::InProgress {
            return NodeClick::NotInProgress;
        }
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            return NodeClick::UnknownNode;
        };
        if node.connected {
            return NodeClick::AlreadyConnected;
        }

        node.connected = true;
        let position = node.position;
        score.add(bonus);

        let particle = Particle {
            id: self.next_particle_id,
            position,
        };
        self.next_particle_id = self.next_particle_id.wrapping_add(1);
        self.particles.push(particle);

        let completed = self.connected_count() == self.total();
        if completed {
            self.phase = NodeGamePhase::Complete;
        }

        NodeClick::Connected {
            node_id,
            particle,
            completed,
        }
    }

    /// Remove an expired click burst. Returns whether it was present.
    pub fn expire_particle(&mut self, particle_id: u32) -> bool {
        let before = self.particles.len();
        self.particles.retain(|p| p.id != particle_id);
        self.particles.len() != before
    }

    /// Raise the scripted critical-error banner. Returns `true` the first
    /// time only. Has no effect on nodes, score, or progress.
    pub const fn raise_critical_error(&mut self) -> bool {
        if self.critical_error {
            return false;
        }
        self.critical_error = true;
        true
    }

    /// Current phase.
    pub const fn phase(&self) -> NodeGamePhase {
        self.phase
    }

    /// Whether every node is connected.
    pub fn is_complete(&self) -> bool {
        self.phase == NodeGamePhase::Complete
    }

    /// All nodes in ring order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Live click bursts.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Whether the critical-error banner is up.
    pub const fn critical_error(&self) -> bool {
        self.critical_error
    }

    /// Number of connected nodes.
    pub fn connected_count(&self) -> u32 {
        let count = self.nodes.iter().filter(|n| n.connected).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Number of nodes on the board.
    pub fn total(&self) -> u32 {
        u32::try_from(self.nodes.len()).unwrap_or(u32::MAX)
    }

    /// `connected / total * 100`, or 0 before the board is laid out.
    pub fn progress(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.connected_count()) / f64::from(total) * 100.0
    }
}

/// Place `board.node_count` nodes evenly on a circle.
///
/// Node `i` sits at angle `i * 2pi / n` measured from the positive x axis,
/// with a color drawn uniformly from the palette.
pub fn layout(board: &BoardConfig, decorator: &mut Decorator) -> Vec<Node> {
    let count = f64::from(board.node_count);
    (0..board.node_count)
        .map(|i| {
            let angle = f64::from(i) * TAU / count;
            let color = decorator.node_color();
            Node {
                id: i,
                position: Position {
                    x: angle.cos().mul_add(board.radius, board.center_x),
                    y: angle.sin().mul_add(board.radius, board.center_y),
                },
                connected: false,
                color,
                color_hex: color.hex().to_owned(),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn started() -> NodeConnectionEngine {
        let mut engine = NodeConnectionEngine::new();
        engine.start(&BoardConfig::default(), &mut Decorator::seeded(11));
        engine
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_engine_is_initializing() {
        let mut engine = NodeConnectionEngine::new();
        let mut score = ScoreTracker::new(1250);
        assert_eq!(engine.phase(), NodeGamePhase::Initializing);
        assert_eq!(engine.click_node(0, &mut score, 50), NodeClick::NotInProgress);
        assert!(close(engine.progress(), 0.0));
    }

    #[test]
    fn layout_places_nodes_on_the_ring() {
        let engine = started();
        assert_eq!(engine.total(), 8);
        assert_eq!(engine.phase(), NodeGamePhase::InProgress);

        let first = engine.nodes().first().unwrap();
        assert!(close(first.position.x, 550.0));
        assert!(close(first.position.y, 300.0));

        // Quarter turn: straight below the center (screen y grows downward).
        let third = engine.nodes().get(2).unwrap();
        assert!(close(third.position.x, 400.0));
        assert!(close(third.position.y, 450.0));

        for node in engine.nodes() {
            let dx = node.position.x - 400.0;
            let dy = node.position.y - 300.0;
            assert!(close(dx.hypot(dy), 150.0));
            assert!(!node.connected);
            assert_eq!(node.color_hex, node.color.hex());
        }
    }

    #[test]
    fn click_connects_and_scores() {
        let mut engine = started();
        let mut score = ScoreTracker::new(1250);

        let outcome = engine.click_node(3, &mut score, 50);
        assert!(matches!(
            outcome,
            NodeClick::Connected { node_id: 3, completed: false, .. }
        ));
        assert_eq!(score.value(), 1300);
        assert_eq!(engine.connected_count(), 1);
        assert!(close(engine.progress(), 12.5));
        assert_eq!(engine.particles().len(), 1);
    }

    #[test]
    fn repeated_click_is_idempotent() {
        let mut engine = started();
        let mut score = ScoreTracker::new(1250);

        engine.click_node(5, &mut score, 50);
        assert_eq!(engine.click_node(5, &mut score, 50), NodeClick::AlreadyConnected);
        assert_eq!(score.value(), 1300);
        assert_eq!(engine.connected_count(), 1);
        assert_eq!(engine.particles().len(), 1);
    }

    #[test]
    fn unknown_node_is_ignored() {
        let mut engine = started();
        let mut score = ScoreTracker::new(1250);
        assert_eq!(engine.click_node(99, &mut score, 50), NodeClick::UnknownNode);
        assert_eq!(score.value(), 1250);
    }

    #[test]
    fn connecting_every_node_completes() {
        let mut engine = started();
        let mut score = ScoreTracker::new(1250);

        for id in 0..7 {
            engine.click_node(id, &mut score, 50);
            assert!(!engine.is_complete());
        }
        let last = engine.click_node(7, &mut score, 50);
        assert!(matches!(last, NodeClick::Connected { completed: true, .. }));
        assert!(engine.is_complete());
        assert!(close(engine.progress(), 100.0));
        assert_eq!(score.value(), 1650);

        // Complete boards ignore further clicks.
        assert_eq!(engine.click_node(0, &mut score, 50), NodeClick::NotInProgress);
        assert_eq!(score.value(), 1650);
    }

    #[test]
    fn connected_count_never_decreases() {
        let mut engine = started();
        let mut score = ScoreTracker::new(0);
        let clicks = [2, 2, 9, 0, 2, 7, 7, 1, 3, 0, 4, 5, 6, 6];
        let mut last = 0;
        for id in clicks {
            engine.click_node(id, &mut score, 50);
            let now = engine.connected_count();
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 8);
        assert_eq!(score.value(), 400);
    }

    #[test]
    fn particles_expire_individually() {
        let mut engine = started();
        let mut score = ScoreTracker::new(0);
        engine.click_node(0, &mut score, 50);
        engine.click_node(1, &mut score, 50);
        let ids: Vec<u32> = engine.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1]);

        assert!(engine.expire_particle(0));
        assert!(!engine.expire_particle(0));
        assert_eq!(engine.particles().len(), 1);
    }

    #[test]
    fn critical_error_is_cosmetic() {
        let mut engine = started();
        let before = engine.clone();
        assert!(engine.raise_critical_error());
        assert!(!engine.raise_critical_error());
        assert!(engine.critical_error());
        assert_eq!(engine.nodes(), before.nodes());
        assert!(close(engine.progress(), before.progress()));
    }

    #[test]
    fn restart_resets_the_board() {
        let mut engine = started();
        let mut score = ScoreTracker::new(0);
        engine.click_node(0, &mut score, 50);
        engine.raise_critical_error();

        engine.start(&BoardConfig::default(), &mut Decorator::seeded(12));
        assert_eq!(engine.connected_count(), 0);
        assert!(engine.particles().is_empty());
        assert!(!engine.critical_error());
    }
}
