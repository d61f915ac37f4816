//! Merge of a template into the current map configuration.
//!
//! The current map keeps its view (projection, center, zoom, extents) and
//! receives the content of the template: layers, groups, backgrounds and
//! search services. The widgets of both sides are dropped.

use cartouche_prelude::map::{Background, Group, GroupNode, Layer, MapSection};
use cartouche_prelude::MapConfiguration;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Adds the keys of `source` missing in `target`, recursively.
fn overlay_missing(target: &mut Value, source: Value) {
    if let (Value::Object(target), Value::Object(source)) = (target, source) {
        overlay_missing_map(target, source);
    }
}

fn overlay_missing_map(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => overlay_missing(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

fn rename_nodes(nodes: &mut [GroupNode], renames: &HashMap<String, String>) {
    for node in nodes.iter_mut() {
        match node {
            GroupNode::Layer(id) => {
                if let Some(renamed) = renames.get(id.as_str()) {
                    *id = renamed.clone();
                }
            }
            GroupNode::Group(group) => rename_nodes(&mut group.nodes, renames),
        }
    }
}

fn merge_nodes(target: &mut Vec<GroupNode>, source: Vec<GroupNode>) {
    for node in source {
        match node {
            GroupNode::Layer(id) => {
                let exists = target
                    .iter()
                    .any(|item| matches!(item, GroupNode::Layer(other) if *other == id));
                if !exists {
                    target.push(GroupNode::Layer(id));
                }
            }
            GroupNode::Group(group) => {
                let existing = target.iter_mut().find_map(|item| match item {
                    GroupNode::Group(other) if other.id == group.id => Some(other),
                    _ => None,
                });
                match existing {
                    Some(existing) => merge_group(existing, group),
                    None => target.push(GroupNode::Group(group)),
                }
            }
        }
    }
}

fn merge_group(target: &mut Group, source: Group) {
    merge_nodes(&mut target.nodes, source.nodes);
    if target.title.is_none() {
        target.title = source.title;
    }
    overlay_missing_map(&mut target.extra, source.extra);
}

fn merge_groups(target: &mut Vec<Group>, source: Vec<Group>) {
    for group in source {
        match target.iter_mut().find(|item| item.id == group.id) {
            Some(existing) => merge_group(existing, group),
            None => target.push(group),
        }
    }
}

fn merge_backgrounds(target: &mut Vec<Background>, source: Vec<Background>) {
    for background in source {
        if !target.iter().any(|item| item.id == background.id) {
            target.push(background);
        }
    }
}

/// Appends the template layers, returns the ids changed because they
/// collide with a layer of the current map.
fn merge_layers(target: &mut Vec<Layer>, source: Vec<Layer>) -> HashMap<String, String> {
    let current: HashSet<String> = target.iter().filter_map(|layer| layer.id.clone()).collect();
    let mut known = current.clone();
    let has_visible_background = target
        .iter()
        .any(|layer| layer.is_background() && layer.is_visible());
    let mut renames = HashMap::new();
    for mut layer in source {
        if let Some(id) = layer.id.take() {
            let id = if known.contains(&id) {
                let renamed = uuid::Uuid::new_v4().to_string();
                tracing::debug!("layer {} already exists, renamed to {}", id, renamed);
                // template nodes only reference the first layer using an id
                if current.contains(&id) {
                    renames.entry(id).or_insert_with(|| renamed.clone());
                }
                renamed
            } else {
                id
            };
            known.insert(id.clone());
            layer.id = Some(id);
        }
        if has_visible_background && layer.is_background() {
            layer.visibility = Some(false);
        }
        target.push(layer);
    }
    renames
}

fn merge_section(target: &mut MapSection, source: MapSection) {
    let MapSection {
        layers,
        mut groups,
        mut backgrounds,
        text_search_config,
        extra,
        ..
    } = source;

    let renames = merge_layers(&mut target.layers, layers);
    if !renames.is_empty() {
        for group in groups.iter_mut() {
            rename_nodes(&mut group.nodes, &renames);
        }
        for background in backgrounds.iter_mut() {
            if let Some(renamed) = renames.get(background.id.as_str()) {
                background.id = renamed.clone();
            }
        }
    }
    merge_groups(&mut target.groups, groups);
    merge_backgrounds(&mut target.backgrounds, backgrounds);

    match (target.text_search_config.as_mut(), text_search_config) {
        (Some(existing), Some(config)) => existing.services.extend(config.services),
        (None, Some(config)) => target.text_search_config = Some(config),
        (_, None) => {}
    }

    overlay_missing_map(&mut target.extra, extra);
}

/// Merges the template into the current configuration.
pub fn merge(current: &MapConfiguration, template: MapConfiguration) -> MapConfiguration {
    let MapConfiguration {
        version,
        map,
        catalog_services,
        extra,
        ..
    } = template;

    let mut result = current.clone();
    result.widgets_config = None;
    result.version = result.version.or(version);
    match (result.catalog_services.as_mut(), catalog_services) {
        (Some(existing), Some(services)) => overlay_missing(existing, services),
        (None, Some(services)) => result.catalog_services = Some(services),
        (_, None) => {}
    }
    overlay_missing_map(&mut result.extra, extra);
    if let Some(section) = map {
        merge_section(result.map.get_or_insert_with(MapSection::default), section);
    }
    result
}
