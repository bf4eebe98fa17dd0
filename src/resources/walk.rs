//! Pre-order traversal of nested layers.

use crate::document::Layer;

/// Visits `layer` and then, for groups, each child in order.
///
/// The first error stops the walk.
pub fn walk_layer<'a, E>(
    layer: &'a Layer,
    visit: &mut impl FnMut(&'a Layer) -> Result<(), E>,
) -> Result<(), E> {
    visit(layer)?;
    if let Layer::Group(group) = layer {
        walk_layers(&group.layers, visit)?;
    }
    Ok(())
}

/// Walks each of `layers` with [`walk_layer`].
pub fn walk_layers<'a, E>(
    layers: &'a [Layer],
    visit: &mut impl FnMut(&'a Layer) -> Result<(), E>,
) -> Result<(), E> {
    for layer in layers {
        walk_layer(layer, visit)?;
    }
    Ok(())
}
