//! `AgentFilter` — which agents the reconstructor tracks.
//!
//! The predicate usually comes from a geographic filter over home locations
//! computed elsewhere; the reconstructor only ever calls it.

use std::collections::HashSet;

use tc_core::AgentId;

/// Inclusion predicate consulted when an agent would open a trip.
pub trait AgentFilter: Send + Sync {
    fn accepts(&self, agent: AgentId) -> bool;
}

/// Tracks every agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AgentFilter for AcceptAll {
    #[inline]
    fn accepts(&self, _agent: AgentId) -> bool {
        true
    }
}

/// Tracks only an explicit set of agents.
#[derive(Debug, Clone, Default)]
pub struct AgentSet(HashSet<AgentId>);

impl AgentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, agent: AgentId) -> bool {
        self.0.insert(agent)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AgentId> for AgentSet {
    fn from_iter<I: IntoIterator<Item = AgentId>>(iter: I) -> Self {
        AgentSet(iter.into_iter().collect())
    }
}

impl AgentFilter for AgentSet {
    #[inline]
    fn accepts(&self, agent: AgentId) -> bool {
        self.0.contains(&agent)
    }
}

/// Adapts any `Fn(AgentId) -> bool` closure.
///
/// ```rust,ignore
/// let even = FnFilter(|a: AgentId| a.0 % 2 == 0);
/// let mut rec = TripReconstructor::new(even, ModePriority::default());
/// ```
pub struct FnFilter<P>(pub P);

impl<P> AgentFilter for FnFilter<P>
where
    P: Fn(AgentId) -> bool + Send + Sync,
{
    #[inline]
    fn accepts(&self, agent: AgentId) -> bool {
        (self.0)(agent)
    }
}
