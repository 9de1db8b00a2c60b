//! Routes: paths of component-instance ids.
//!
//! A route names a target below the root component instance: root-first,
//! excluding the root's own id. The empty route addresses the receiver
//! itself. Every route a client sees in rendered JSON is a delivery
//! route — threading it back verbatim reaches the component that
//! produced it.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::fresh_id::ComponentId;

/// A root-first path of component-instance ids, excluding the root.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Route(pub Vec<ComponentId>);

impl Route {
    /// The empty route: addresses the receiver.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// This route extended by one child id.
    pub fn child(&self, id: ComponentId) -> Self {
        let mut ids = self.0.clone();
        ids.push(id);
        Self(ids)
    }

    /// First id and remaining ids, if any.
    pub fn split_first(&self) -> Option<(ComponentId, &[ComponentId])> {
        self.0.split_first().map(|(head, tail)| (*head, tail))
    }

    pub fn as_slice(&self) -> &[ComponentId] {
        &self.0
    }

    /// JSON array of ids, root-first.
    pub fn to_json(&self) -> Json {
        Json::Array(self.0.iter().map(|id| Json::from(id.0)).collect())
    }
}

impl From<Vec<ComponentId>> for Route {
    fn from(ids: Vec<ComponentId>) -> Self {
        Self(ids)
    }
}
