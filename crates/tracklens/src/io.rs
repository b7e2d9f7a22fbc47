use std::path::Path;

use tracklens_image::{Image, ImageSize};

use crate::error::IoError;
use crate::track::FrameRecord;

/// Reads an RGB image from the given file path.
///
/// Any format supported by the image crate is accepted; the pixels are converted to
/// 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Reads a frame sequence, a JSON array of frame records.
///
/// The track rows are not validated here, see [`FrameRecord::track_rows`].
pub fn read_frames(file_path: impl AsRef<Path>) -> Result<Vec<FrameRecord>, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let reader = std::io::BufReader::new(std::fs::File::open(file_path)?);
    let frames: Vec<FrameRecord> = serde_json::from_reader(reader)?;

    log::info!("read {} frames from {}", frames.len(), file_path.display());

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_rgb8() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frame.png");

        let mut img = image::RgbImage::new(4, 3);
        img.put_pixel(1, 2, image::Rgb([10, 20, 30]));
        img.save(&file_path)?;

        let image = read_image_rgb8(&file_path)?;
        assert_eq!(image.size(), ImageSize { width: 4, height: 3 });
        assert_eq!(image.get_pixel(1, 2, 0)?, 10);
        assert_eq!(image.get_pixel(1, 2, 2)?, 30);
        assert_eq!(image.get_pixel(0, 0, 0)?, 0);
        Ok(())
    }

    #[test]
    fn read_grayscale_as_rgb8() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");
        image::GrayImage::from_pixel(2, 2, image::Luma([77])).save(&file_path)?;

        let image = read_image_rgb8(&file_path)?;
        assert_eq!(image.as_slice(), &[77u8; 12]);
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let result = read_image_rgb8("/definitely/not/here.png");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
        let result = read_frames("/definitely/not/here.json");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_frame_sequence() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frames.json");
        std::fs::write(
            &file_path,
            r#"[
                { "img_file": "a.png", "objs": [[0, 1, 10.0, 0.0, 1.0, 4.0, 2.0, 1.5, 0.0]] },
                { "img_file": "b.png", "objs": [] }
            ]"#,
        )?;

        let frames = read_frames(&file_path)?;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].img_file, std::path::PathBuf::from("a.png"));
        assert_eq!(frames[0].track_rows()?.len(), 1);
        assert!(frames[1].objs.is_empty());
        Ok(())
    }

    #[test]
    fn read_invalid_sequence() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("frames.json");
        std::fs::write(&file_path, r#"{ "img_file": "a.png" }"#)?;
        assert!(matches!(
            read_frames(&file_path),
            Err(IoError::SequenceParseError(_))
        ));
        Ok(())
    }
}
