//! In-memory rendering surface
//!
//! [`SceneSurface`] records every command it receives so headless runs and
//! tests can observe exactly what the engine produced.

use crate::element::{ElementId, Property};
use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::Rect;
use crate::markup::scan_fragment;
use crate::surface::{NodeInfo, RenderSurface};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
struct SceneNode {
    bounds: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    tag: String,
    text: String,
    markup: String,
    class: String,
    styles: FxHashMap<String, String>,
    properties: FxHashMap<Property, f32>,
    pointer_events: bool,
}

/// Element tree held in memory
#[derive(Clone, Debug, Default)]
pub struct SceneSurface {
    nodes: FxHashMap<ElementId, SceneNode>,
    property_writes: u64,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root-level element with the given bounds
    pub fn insert(&mut self, id: ElementId, bounds: Rect) {
        self.nodes.insert(
            id,
            SceneNode {
                bounds,
                tag: "div".to_string(),
                pointer_events: true,
                ..Default::default()
            },
        );
    }

    /// Insert an element nested under `parent` with explicit bounds
    pub fn insert_child(
        &mut self,
        parent: &ElementId,
        id: ElementId,
        bounds: Rect,
    ) -> SurfaceResult<()> {
        if !self.nodes.contains_key(parent) {
            return Err(SurfaceError::MissingParent(parent.clone()));
        }
        if self.nodes.contains_key(&id) {
            return Err(SurfaceError::DuplicateElement(id));
        }
        self.insert(id.clone(), bounds);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = Some(parent.clone());
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(())
    }

    /// Remove an element and its subtree
    pub fn remove(&mut self, id: &ElementId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let Some(parent) = node.parent.as_ref().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| c != id);
        }
        for child in node.children {
            self.remove(&child);
        }
    }

    pub fn set_bounds(&mut self, id: &ElementId, bounds: Rect) -> SurfaceResult<()> {
        self.node_mut(id)?.bounds = bounds;
        Ok(())
    }

    pub fn text(&self, id: &ElementId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.text.as_str())
    }

    pub fn markup(&self, id: &ElementId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.markup.as_str())
    }

    pub fn class(&self, id: &ElementId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.class.as_str())
    }

    pub fn style(&self, id: &ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.styles.get(name))
            .map(String::as_str)
    }

    pub fn pointer_events(&self, id: &ElementId) -> Option<bool> {
        self.nodes.get(id).map(|n| n.pointer_events)
    }

    /// Property value, falling back to the property's rest value
    pub fn property_or_rest(&self, id: &ElementId, property: Property) -> f32 {
        self.property(id, property)
            .unwrap_or_else(|| property.rest_value())
    }

    /// Total number of numeric property writes received
    pub fn property_writes(&self) -> u64 {
        self.property_writes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, id: &ElementId) -> SurfaceResult<&mut SceneNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SurfaceError::MissingElement(id.clone()))
    }

    fn clear_children(&mut self, id: &ElementId) {
        let children = self
            .nodes
            .get_mut(id)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in children {
            self.remove(&child);
        }
    }

    /// Lay children out left to right, splitting the parent's width evenly
    fn relayout(&mut self, parent: &ElementId) {
        let Some(node) = self.nodes.get(parent) else {
            return;
        };
        let bounds = node.bounds;
        let children = node.children.clone();
        if children.is_empty() {
            return;
        }
        let width = bounds.width() / children.len() as f32;
        for (i, child) in children.iter().enumerate() {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.bounds = Rect::new(
                    bounds.x() + width * i as f32,
                    bounds.y(),
                    width,
                    bounds.height(),
                );
            }
        }
    }
}

impl RenderSurface for SceneSurface {
    fn exists(&self, element: &ElementId) -> bool {
        self.nodes.contains_key(element)
    }

    fn bounds(&self, element: &ElementId) -> Option<Rect> {
        self.nodes.get(element).map(|n| n.bounds)
    }

    fn property(&self, element: &ElementId, property: Property) -> Option<f32> {
        self.nodes
            .get(element)
            .and_then(|n| n.properties.get(&property))
            .copied()
    }

    fn set_property(
        &mut self,
        element: &ElementId,
        property: Property,
        value: f32,
    ) -> SurfaceResult<()> {
        if !value.is_finite() {
            return Err(SurfaceError::NonFinite {
                element: element.clone(),
                property: property.name(),
                value,
            });
        }
        self.node_mut(element)?.properties.insert(property, value);
        self.property_writes += 1;
        Ok(())
    }

    fn set_style(&mut self, element: &ElementId, name: &str, value: &str) -> SurfaceResult<()> {
        self.node_mut(element)?
            .styles
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&mut self, element: &ElementId, text: &str) -> SurfaceResult<()> {
        self.node_mut(element)?.text = text.to_string();
        Ok(())
    }

    fn set_markup(&mut self, element: &ElementId, markup: &str) -> SurfaceResult<()> {
        self.node_mut(element)?.markup = markup.to_string();
        self.clear_children(element);

        for (i, node) in scan_fragment(markup).into_iter().enumerate() {
            let id = ElementId::child(element, i);
            self.insert_child(element, id.clone(), Rect::ZERO)?;
            if let Some(child) = self.nodes.get_mut(&id) {
                child.tag = node.tag;
                child.text = node.text;
            }
        }
        self.relayout(element);
        Ok(())
    }

    fn set_class(&mut self, element: &ElementId, class: &str) -> SurfaceResult<()> {
        self.node_mut(element)?.class = class.to_string();
        Ok(())
    }

    fn set_pointer_events(&mut self, element: &ElementId, enabled: bool) -> SurfaceResult<()> {
        self.node_mut(element)?.pointer_events = enabled;
        Ok(())
    }

    fn append_child(
        &mut self,
        parent: &ElementId,
        child: ElementId,
        text: &str,
    ) -> SurfaceResult<()> {
        self.insert_child(parent, child.clone(), Rect::ZERO)?;
        self.set_text(&child, text)?;
        self.relayout(parent);
        Ok(())
    }

    fn children(&self, element: &ElementId) -> Vec<NodeInfo> {
        let Some(node) = self.nodes.get(element) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|id| {
                self.nodes.get(id).map(|child| NodeInfo {
                    id: id.clone(),
                    tag: child.tag.clone(),
                    text: child.text.clone(),
                })
            })
            .collect()
    }
}
