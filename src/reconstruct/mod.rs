use log::debug;

use crate::config::RenderOptions;
use crate::container::image::ImageInspect;
use crate::container::source::InspectSource;
use crate::container::{slice, ContainerInspect};
use crate::error::Result;
use crate::reconstruct::baseline::Baseline;
use crate::reconstruct::option::OptionSpec;

pub mod baseline;
pub mod catalog;
mod handler;
pub mod option;
pub mod present;

/// Inspects `target` and its image, then renders the equivalent `docker run` arguments.
pub fn reconstruct<S: InspectSource>(source: &S, target: &str, options: &RenderOptions) -> Result<String> {
    let container = source.container(target)?;
    debug!("Inspected container {} ({})", container.short_name(), container.short_id());
    let image = source.image(container.image_reference())?;
    debug!("Inspected image {}", image.id);
    Ok(render(&container, &image, options))
}

pub fn render(container: &ContainerInspect, image: &ImageInspect, options: &RenderOptions) -> String {
    let baseline = Baseline::new(container, image);
    let catalog = catalog::build(container, baseline, options);
    let flags = evaluate(&catalog);
    debug!("{} catalog entries produced {} flags", catalog.len(), flags.len());

    let name = (!options.omit_name).then(|| container.short_name());
    let image_ref = if container.config.image.is_empty() {
        &container.image
    } else {
        &container.config.image
    };
    let command = handler::command(slice(&container.config.cmd), baseline.image_cmd());
    let tokens = present::assemble(name, flags, image_ref, command);
    present::present(&tokens, options.separator)
}

/// Concatenates the tokens of every catalog entry, in catalog order.
pub fn evaluate(catalog: &[OptionSpec]) -> Vec<String> {
    catalog.iter().flat_map(OptionSpec::tokens).collect()
}
