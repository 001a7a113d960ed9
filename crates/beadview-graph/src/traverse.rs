//! Hop-synchronized breadth-first frontiers over a [`GraphModel`].
//!
//! A [`Frontier`] advances one hop per call and reports only the ids it
//! discovered on that hop, in discovery order. Callers sort before exposing
//! ids.

use std::collections::HashSet;

use petgraph::Direction;

use crate::model::GraphModel;

/// Follow incoming edges only (towards blockers / parents' owners).
pub const UPSTREAM: &[Direction] = &[Direction::Incoming];
/// Follow outgoing edges only (towards dependents).
pub const DOWNSTREAM: &[Direction] = &[Direction::Outgoing];
/// Follow both directions, treating edges as undirected.
pub const UNDIRECTED: &[Direction] = &[Direction::Outgoing, Direction::Incoming];

pub struct Frontier<'a> {
    model: &'a GraphModel,
    directions: &'static [Direction],
    visited: HashSet<&'a str>,
    current: Vec<&'a str>,
}

impl<'a> Frontier<'a> {
    pub fn new(model: &'a GraphModel, start: &'a str, directions: &'static [Direction]) -> Self {
        Self {
            model,
            directions,
            visited: HashSet::from([start]),
            current: vec![start],
        }
    }

    /// `true` once a hop discovered nothing new.
    pub fn is_exhausted(&self) -> bool {
        self.current.is_empty()
    }

    /// Advance one hop and return the newly discovered ids.
    pub fn advance(&mut self) -> Vec<&'a str> {
        let mut next: Vec<&'a str> = Vec::new();
        for &id in &self.current {
            for &direction in self.directions {
                for neighbor in self.model.neighbors_directed(id, direction) {
                    if self.visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
        }
        self.current.clone_from(&next);
        next
    }

    /// Every id seen so far, including the start.
    pub fn into_visited(self) -> HashSet<&'a str> {
        self.visited
    }
}
