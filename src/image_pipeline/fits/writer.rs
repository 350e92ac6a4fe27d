use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::plane::ImagePlane;

pub trait ContainerWriter {
    type Container;
    /// Open input that planes are copied from.
    type Source;

    fn create_container(&self, path: &Path) -> Result<Self::Container>;
    fn copy_plane_verbatim(
        &self,
        source: &mut Self::Source,
        index: usize,
        dest: &mut Self::Container,
    ) -> Result<()>;
    fn write_image_plane(&self, dest: &mut Self::Container, name: &str, plane: &ImagePlane) -> Result<()>;
    fn finish(&self, dest: Self::Container) -> Result<()>;
}
