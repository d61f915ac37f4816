use cartouche_prelude::map::{Center, MapSection};
use cartouche_prelude::MapConfiguration;

#[derive(Debug)]
pub struct Replacement {
    pub config: MapConfiguration,
    /// The template has no zoom but an extent the view should be fitted to.
    pub zoom_to_extent: bool,
}

/// Replaces the current configuration with the template one, only the current
/// zoom and center are used when the template doesn't define them.
pub fn replace(
    template: MapConfiguration,
    zoom: Option<f64>,
    center: Option<Center>,
) -> Replacement {
    let mut config = template;
    let map = config.map.get_or_insert_with(MapSection::default);
    let zoom_to_extent = map.zoom.is_none() && (map.bbox.is_some() || map.max_extent.is_some());
    if map.zoom.is_none() {
        map.zoom = zoom;
    }
    if map.center.is_none() {
        map.center = center;
    }
    Replacement {
        config,
        zoom_to_extent,
    }
}
