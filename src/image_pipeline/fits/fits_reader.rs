//! FITS container reader.
//!
//! Opening a file asks cfitsio for every HDU description once; pixel data
//! is only read when a plane is requested.

use std::path::Path;

use fitsio::FitsFile;
use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::images::ImageType;
use tracing::debug;

use crate::image_pipeline::common::error::{Result, SkipperError};
use crate::image_pipeline::fits::reader::ContainerReader;
use crate::image_pipeline::plane::{BitPix, ImagePlane};

/// An open FITS file and its HDU descriptions.
pub struct FitsInput {
    file: FitsFile,
    hdus: Vec<FitsHdu>,
}

impl FitsInput {
    fn hdu(&self, index: usize) -> Result<&FitsHdu> {
        self.hdus.get(index).ok_or_else(|| {
            SkipperError::Container(format!("no HDU {} (file has {})", index, self.hdus.len()))
        })
    }

    /// HDU `index` together with the file handle needed to act on it.
    pub(super) fn hdu_and_file(&mut self, index: usize) -> Result<(&FitsHdu, &mut FitsFile)> {
        let count = self.hdus.len();
        let hdu = self.hdus.get(index).ok_or_else(|| {
            SkipperError::Container(format!("no HDU {} (file has {})", index, count))
        })?;
        Ok((hdu, &mut self.file))
    }
}

pub struct FitsReader;

/// Storage type of an image HDU. cfitsio reports BZERO-shifted integers
/// as unsigned types; they keep the width of their stored type.
fn bitpix_of(image_type: &ImageType) -> BitPix {
    match image_type {
        ImageType::UnsignedByte | ImageType::Byte => BitPix::U8,
        ImageType::Short | ImageType::UnsignedShort => BitPix::I16,
        ImageType::Long | ImageType::UnsignedLong => BitPix::I32,
        ImageType::LongLong => BitPix::I64,
        ImageType::Float => BitPix::F32,
        ImageType::Double => BitPix::F64,
    }
}

fn pixel_count(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Ok(0);
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &axis| acc.checked_mul(axis))
        .ok_or_else(|| SkipperError::MalformedExtension(format!("image shape {:?} is too large", shape)))
}

impl ContainerReader for FitsReader {
    type Container = FitsInput;

    fn open_for_read(&self, path: &Path) -> Result<FitsInput> {
        let mut file = FitsFile::open(path)?;
        let count = file.num_hdus()?;
        let hdus = (0..count)
            .map(|i| file.hdu(i))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(path = %path.display(), hdus = hdus.len(), "Opened FITS file");
        Ok(FitsInput { file, hdus })
    }

    fn plane_count(&self, container: &FitsInput) -> usize {
        container.hdus.len()
    }

    fn is_image_plane(&self, container: &FitsInput, index: usize) -> Result<bool> {
        match &container.hdu(index)?.info {
            HduInfo::ImageInfo { shape, .. } => Ok(pixel_count(shape)? > 0),
            _ => Ok(false),
        }
    }

    fn read_plane(&self, container: &mut FitsInput, index: usize) -> Result<ImagePlane> {
        if !self.is_image_plane(container, index)? {
            return Err(SkipperError::MalformedExtension(format!(
                "HDU {} does not hold image pixels",
                index
            )));
        }

        let (hdu, file) = container.hdu_and_file(index)?;
        let HduInfo::ImageInfo { shape, image_type } = &hdu.info else {
            return Err(SkipperError::MalformedExtension(format!("HDU {} is not an image", index)));
        };
        let bitpix = bitpix_of(image_type);
        // cfitsio reports axes slowest first: [NAXIS2, NAXIS1]
        let (width, height) = match shape.as_slice() {
            [w] => (*w, 1),
            [h, w] => (*w, *h),
            _ => {
                return Err(SkipperError::MalformedExtension(format!(
                    "HDU {} has {} axes, only 1-D and 2-D images are supported",
                    index,
                    shape.len()
                )));
            }
        };

        let bzero = hdu.read_key::<f64>(file, "BZERO").unwrap_or(0.0);
        let pixels: Vec<f64> = hdu.read_image(file)?;
        debug!(index, width, height, bitpix = bitpix.code(), "Read image plane");

        Ok(ImagePlane::new(width, height, bitpix, pixels)?.with_bzero(bzero))
    }
}
