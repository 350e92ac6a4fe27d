use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::plane::ImagePlane;

pub trait ContainerReader {
    type Container;

    fn open_for_read(&self, path: &Path) -> Result<Self::Container>;
    fn plane_count(&self, container: &Self::Container) -> usize;
    fn is_image_plane(&self, container: &Self::Container, index: usize) -> Result<bool>;
    fn read_plane(&self, container: &mut Self::Container, index: usize) -> Result<ImagePlane>;
}
