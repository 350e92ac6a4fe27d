use std::path::{Path, PathBuf};

use fitsio::FitsFile;
use fitsio::images::{ImageDescription, ImageType};
use tracing::debug;

use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::fits::fits_reader::FitsInput;
use crate::image_pipeline::fits::writer::ContainerWriter;
use crate::image_pipeline::plane::ImagePlane;

/// A FITS file being written, one HDU at a time.
///
/// The file is created on the first write, so that an image written first
/// becomes the primary HDU instead of following an empty one.
pub struct FitsOutput {
    path: PathBuf,
    file: Option<FitsFile>,
    hdu_count: usize,
}

impl FitsOutput {
    pub fn hdu_count(&self) -> usize {
        self.hdu_count
    }

    fn create_file(&mut self, primary: Option<&ImageDescription>) -> Result<&mut FitsFile> {
        let new_file = FitsFile::create(&self.path);
        let new_file = match primary {
            Some(description) => new_file.with_custom_primary(description),
            None => new_file,
        };
        let file = new_file.open()?;
        debug!(path = %self.path.display(), "Created FITS file");
        self.hdu_count = 1;
        Ok(self.file.insert(file))
    }

    fn file_mut(&mut self) -> Result<&mut FitsFile> {
        let path = &self.path;
        self.file
            .as_mut()
            .ok_or_else(|| SkipperError::Container(format!("{} has not been created", path.display())))
    }
}

/// Writes image planes as single-precision float HDUs.
pub struct FitsWriter;

impl ContainerWriter for FitsWriter {
    type Container = FitsOutput;
    type Source = FitsInput;

    fn create_container(&self, path: &Path) -> Result<FitsOutput> {
        Ok(FitsOutput {
            path: path.to_path_buf(),
            file: None,
            hdu_count: 0,
        })
    }

    fn copy_plane_verbatim(&self, source: &mut FitsInput, index: usize, dest: &mut FitsOutput) -> Result<()> {
        let (hdu, source_file) = source.hdu_and_file(index)?;

        if dest.file.is_none() {
            dest.create_file(None)?;
            if index == 0 {
                // a non-image primary carries no data; the fresh one stands in for it
                debug!("Primary HDU replaced by an empty primary");
                return Ok(());
            }
        }

        hdu.copy_to(source_file, dest.file_mut()?)?;
        dest.hdu_count += 1;
        Ok(())
    }

    fn write_image_plane(&self, dest: &mut FitsOutput, name: &str, plane: &ImagePlane) -> Result<()> {
        let dimensions = [plane.height(), plane.width()];
        let description = ImageDescription {
            data_type: ImageType::Float,
            dimensions: &dimensions,
        };

        let hdu = if dest.file.is_none() {
            dest.create_file(Some(&description))?.primary_hdu()?
        } else {
            let hdu = dest.file_mut()?.create_image(name.to_string(), &description)?;
            dest.hdu_count += 1;
            hdu
        };
        debug!(
            hdu = dest.hdu_count - 1,
            name,
            width = plane.width(),
            height = plane.height(),
            "Writing image plane"
        );
        hdu.write_image(dest.file_mut()?, plane.data())?;
        Ok(())
    }

    fn finish(&self, mut dest: FitsOutput) -> Result<()> {
        if dest.file.is_none() {
            dest.create_file(None)?;
        }
        debug!(path = %dest.path.display(), hdus = dest.hdu_count, "Closed FITS file");
        Ok(())
    }
}
